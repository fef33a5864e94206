//! Entry point: load one OBJ model and fly around it.

mod config;

use anyhow::Result;
use asset::ObjError;

use crate::config::AppConfig;

/// Process exit code for a model that failed to load: 1 when the file is missing,
/// 2 for anything wrong with its contents.
fn exit_code_for(err: &ObjError) -> i32 {
    if err.is_not_found() { 1 } else { 2 }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_args(&args);
    log::info!(
        "Starting viewer. Model: {}, backend: {:?}, shading: {:?}, show_fps={}, window_size={}x{}",
        config.model_path.display(),
        config.backends,
        config.shading,
        config.show_fps,
        config.width,
        config.height
    );

    let mesh = match asset::obj::load_obj_from_path(&config.model_path) {
        Ok(mesh) => mesh,
        Err(err) => {
            let code = exit_code_for(&err);
            log::error!("Could not load model: {:#}", anyhow::Error::from(err));
            log::error!("Terminated with error code {code}");
            std::process::exit(code);
        }
    };

    platform::run_viewer(config.viewer_config(), &mesh)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
