//! Command-line configuration (`--key=value` flags).

use std::path::PathBuf;

use platform::ViewerConfig;
use renderer::{RenderSettings, Shading};

pub const DEFAULT_MODEL_PATH: &str = "assets/cube.obj";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
    pub shading: Shading,
    pub diffuse_intensity: f32,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Self {
        let (width, height) = parse_size_args(args);
        Self {
            model_path: parse_model_arg(args),
            backends: parse_backend_arg(args),
            width,
            height,
            show_fps: parse_show_fps_arg(args),
            shading: parse_shader_arg(args),
            diffuse_intensity: parse_diffuse_arg(args),
        }
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            backends: self.backends,
            width: self.width,
            height: self.height,
            show_fps: self.show_fps,
            render: RenderSettings {
                shading: self.shading,
                diffuse_intensity: self.diffuse_intensity,
                ..RenderSettings::default()
            },
        }
    }
}

fn parse_model_arg(args: &[String]) -> PathBuf {
    args.iter()
        .rev()
        .find_map(|arg| arg.strip_prefix("--model="))
        .filter(|path| !path.is_empty())
        .unwrap_or(DEFAULT_MODEL_PATH)
        .into()
}

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_on_off(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

fn parse_show_fps_arg(args: &[String]) -> bool {
    // --show-fps[=on|off], off by default
    for arg in args {
        if arg == "--show-fps" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--show-fps=") {
            return parse_on_off(val);
        }
    }
    false
}

fn parse_shader_arg(args: &[String]) -> Shading {
    // --shader=on|off, lit by default
    let mut shading = Shading::Lit;
    for arg in args {
        if let Some(val) = arg.strip_prefix("--shader=") {
            shading = if parse_on_off(val) {
                Shading::Lit
            } else {
                Shading::Flat
            };
        }
    }
    shading
}

fn parse_diffuse_arg(args: &[String]) -> f32 {
    let mut diffuse = 1.0;
    for arg in args {
        if let Some(val) = arg.strip_prefix("--diffuse=") {
            match val.parse::<f32>() {
                Ok(v) if v.is_finite() && v >= 0.0 => diffuse = v,
                _ => log::warn!("Ignoring invalid --diffuse value '{}'.", val),
            }
        }
    }
    diffuse
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        let cfg = AppConfig::from_args(&[]);
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(cfg.backends, wgpu::Backends::all());
        assert_eq!((cfg.width, cfg.height), (1280, 720));
        assert!(!cfg.show_fps);
        assert_eq!(cfg.shading, Shading::Lit);
        assert_eq!(cfg.diffuse_intensity, 1.0);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = AppConfig::from_args(&args(&[
            "--model=models/monkey.obj",
            "--gpu-backend=GL",
            "--size=800x600",
            "--height=500",
            "--show-fps",
            "--shader=off",
            "--diffuse=0.25",
        ]));
        assert_eq!(cfg.model_path, PathBuf::from("models/monkey.obj"));
        assert_eq!(cfg.backends, wgpu::Backends::GL);
        assert_eq!((cfg.width, cfg.height), (800, 500));
        assert!(cfg.show_fps);
        assert_eq!(cfg.shading, Shading::Flat);
        assert_eq!(cfg.diffuse_intensity, 0.25);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = AppConfig::from_args(&args(&[
            "--gpu-backend=glide",
            "--size=big",
            "--width=0",
            "--diffuse=-1",
            "--model=",
        ]));
        assert_eq!(cfg.backends, wgpu::Backends::all());
        assert_eq!((cfg.width, cfg.height), (1, 720));
        assert_eq!(cfg.diffuse_intensity, 1.0);
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn viewer_config_carries_render_settings() {
        let cfg = AppConfig::from_args(&args(&["--diffuse=0.5", "--show-fps=on"]));
        let viewer = cfg.viewer_config();
        assert!(viewer.show_fps);
        assert_eq!(viewer.render.diffuse_intensity, 0.5);
        assert_eq!(viewer.render.shading, Shading::Lit);
        assert_eq!(viewer.render.ambient, RenderSettings::default().ambient);
    }
}
