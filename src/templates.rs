//! HTML page templates.
//!
//! Templates live as standalone files under `templates/` and are compiled into
//! the binary with `include_str!`, so the server has no runtime dependency on
//! its working directory for pages. minijinja auto-escapes every template whose
//! name ends in `.html`.

use minijinja::Environment;
use serde::Serialize;

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
pub const NOTES_TEMPLATE: &str = include_str!("../templates/notes.html");
pub const WEATHER_TEMPLATE: &str = include_str!("../templates/weather.html");
pub const CURRENCY_TEMPLATE: &str = include_str!("../templates/currency.html");

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("notes.html", NOTES_TEMPLATE)?;
        env.add_template("weather.html", WEATHER_TEMPLATE)?;
        env.add_template("currency.html", CURRENCY_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}
