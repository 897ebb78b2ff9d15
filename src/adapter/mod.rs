pub mod params;
pub mod platformio;
pub mod request;
pub mod response;
pub mod usersync;
