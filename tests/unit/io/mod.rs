mod configuration;
mod logging;
mod progress;
mod visualization;
