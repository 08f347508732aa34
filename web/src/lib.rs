use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod settings;
mod timer;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, args_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    if let Some(err) = args_error {
        log::warn!("ignoring URL arguments: {}", err);
    }
    log::debug!("args: {:?}", args);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_hash_arguments_parse() {
        let args = Args::try_parse_from("#-v&--seed=42&--pairs=6".split(['#', '&'])).unwrap();

        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.pairs, Some(6));
        assert!(args.verbose.log_level().is_some());
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();

        assert_eq!(args.game, game::GameProps::default());
    }
}
