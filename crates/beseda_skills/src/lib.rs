pub mod arithmetic;
pub mod clock;
pub mod weather;

pub use arithmetic::{calculate, CalcError, Operator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use weather::{describe_weather, Conditions, OpenWeatherClient, WeatherError, WeatherProvider};
