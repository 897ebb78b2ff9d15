// src/adapter/usersync.rs

/// Placeholder in the exchange's usersync template that receives the escaped
/// redirect-back URL. Older templates simply end at the query value, in which
/// case the escaped URL is appended instead.
pub const RURL_MACRO: &str = "{{rurl}}";

/// Macro the exchange replaces with its own user id when it fires the
/// redirect. Left literal here; escaped along with the rest of the URL.
pub const USER_ALIAS_MACRO: &str = "%%USER_ALIAS%%";

/// Builds the redirect URL used to register a usersync pixel with the
/// exchange. The inner setuid URL is percent-escaped exactly once, as a
/// whole, so reserved characters survive one decode on the exchange side.
pub fn build_sync_url(template: &str, external_url: &str, family: &str) -> String {
    let redirect = format!(
        "{}/setuid?bidder={}&uid={}",
        external_url, family, USER_ALIAS_MACRO
    );
    let escaped = urlencoding::encode(&redirect);
    if template.contains(RURL_MACRO) {
        template.replace(RURL_MACRO, escaped.as_ref())
    } else {
        format!("{}{}", template, escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: &str =
        "usersync?rurl=http%3A%2F%2Flocalhost%2Fsetuid%3Fbidder%3Dplatformio%26uid%3D%25%25USER_ALIAS%25%25";

    #[test]
    fn appends_to_bare_query_template() {
        let url = build_sync_url("usersync?rurl=", "http://localhost", "platformio");
        assert_eq!(url, GOLDEN);
    }

    #[test]
    fn substitutes_explicit_placeholder() {
        let url = build_sync_url(
            "usersync?rurl={{rurl}}&gdpr=0",
            "http://localhost",
            "platformio",
        );
        assert_eq!(url, format!("{}&gdpr=0", GOLDEN));
    }
}
