use candle_core::Device;
use tracing::{debug, info, warn};

/// Picks the encoder's compute device from the enabled cargo features.
///
/// `metal` is tried before `cuda`; anything that fails to open falls back to CPU.
pub fn select_device() -> Device {
    for backend in gpu_candidates() {
        match backend.open() {
            Ok(device) => {
                info!(backend = backend.name(), "Encoder using GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(backend = backend.name(), error = %e, "GPU backend unavailable");
            }
        }
    }

    debug!("Encoder running on CPU");
    Device::Cpu
}

#[derive(Debug, Clone, Copy)]
enum GpuBackend {
    Metal,
    Cuda,
}

impl GpuBackend {
    fn name(self) -> &'static str {
        match self {
            GpuBackend::Metal => "metal",
            GpuBackend::Cuda => "cuda",
        }
    }

    fn open(self) -> candle_core::Result<Device> {
        match self {
            GpuBackend::Metal => Device::new_metal(0),
            GpuBackend::Cuda => Device::new_cuda(0),
        }
    }
}

fn gpu_candidates() -> Vec<GpuBackend> {
    let mut candidates = Vec::new();
    if cfg!(feature = "metal") {
        candidates.push(GpuBackend::Metal);
    }
    if cfg!(feature = "cuda") {
        candidates.push(GpuBackend::Cuda);
    }
    candidates
}
