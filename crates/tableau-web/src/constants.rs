// Browser-side tuning: canvas, render targets and audio routing

// Canvas created inside #scene-container
pub const CANVAS_ID: &str = "scene-canvas";

// Render targets
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const DRAW_UNIFORM_STRIDE: u64 = 256; // minUniformBufferOffsetAlignment on every WebGPU adapter

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a hidden tab resumes

// Warm spot reaches the table from 8 m away; scale so decay 2 still lights it
pub const SPOT_RADIANCE_SCALE: f32 = 10.0;
