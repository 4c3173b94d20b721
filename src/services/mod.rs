pub mod currency;
pub mod note;
pub mod weather;

pub use currency::{ExchangeRateProvider, FrankfurterClient};
pub use note::NoteService;
pub use weather::{WeatherApiClient, WeatherProvider};
