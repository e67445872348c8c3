//! Error types for the card
//!
//! The evasion core itself never fails; these cover the edges around it
//! (settings loading, double initialization, GPU setup).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("evasion bounds are already initialized for this session")]
    BoundsAlreadyInitialized,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("page is missing {0}")]
    MissingElement(&'static str),

    #[error("failed to create render surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("render surface reports no supported {0}")]
    SurfaceUnsupported(&'static str),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, CardError>;
