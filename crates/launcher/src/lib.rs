use shared::ModError;
use thiserror::Error;

pub mod headless;
pub mod native;


#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Mod(#[from] ModError),
    #[error("app exited with code {0}")]
    AppExit(u8),
}
