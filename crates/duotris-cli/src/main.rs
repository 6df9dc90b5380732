mod command;
mod config;
mod logging;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
