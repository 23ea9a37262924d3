use startravel::{AppConfig, StarTravel};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path);
                config
            }
            Err(err) => {
                log::error!("{}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Err(err) = StarTravel::new().with_config(config).run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
