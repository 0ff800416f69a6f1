//! External API integrations

pub mod geocoding;
pub mod openai;
pub mod sheets;
pub mod slack;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use openai::ChatClient;
pub use sheets::SheetsClient;
pub use slack::SlackClient;
pub use weather::WeatherClient;
