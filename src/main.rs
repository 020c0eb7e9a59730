mod config;
mod engine;
mod mpris;
mod persist;
mod runtime;
mod session;
mod track;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
