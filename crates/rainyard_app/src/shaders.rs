//! WGSL shaders

/// Rain point sprites: one instanced quad per particle, sized in pixels,
/// faded toward the fog color with distance from the camera
pub const RAIN_SHADER: &str = r#"
// ============================================================================
// Rainyard Rain Shader
// ============================================================================

struct RainUniforms {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    rain_color: vec4<f32>,
    fog_color: vec4<f32>,
    // x: near, y: far, z: enabled (0 or 1)
    fog: vec4<f32>,
    // xy: render target size in pixels, z: point size in pixels
    viewport: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) fog: f32,
}

// Flattened xyz triples
@group(0) @binding(0) var<storage, read> positions: array<f32>;
@group(0) @binding(1) var<uniform> uniforms: RainUniforms;

fn fog_factor(distance: f32) -> f32 {
    if (uniforms.fog.z < 0.5) {
        return 0.0;
    }
    let range = uniforms.fog.y - uniforms.fog.x;
    if (range <= 0.0) {
        return select(0.0, 1.0, distance >= uniforms.fog.y);
    }
    return clamp((distance - uniforms.fog.x) / range, 0.0, 1.0);
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
    );
    let corner = corners[vertex_index];

    let base = instance_index * 3u;
    let world = vec3<f32>(positions[base], positions[base + 1u], positions[base + 2u]);
    let clip = uniforms.view_proj * vec4<f32>(world, 1.0);

    // Behind the camera: push outside the depth range
    if (clip.w <= 0.0) {
        out.position = vec4<f32>(0.0, 0.0, 2.0, 1.0);
        out.corner = corner;
        out.fog = 1.0;
        return out;
    }

    // One pixel is 2 / size in NDC
    let offset = corner * uniforms.viewport.z / uniforms.viewport.xy;
    out.position = vec4<f32>(clip.xy + offset * clip.w, clip.zw);
    out.corner = corner;
    out.fog = fog_factor(length(world - uniforms.camera_position.xyz));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let edge = 1.0 - smoothstep(0.5, 1.0, length(in.corner));
    let color = mix(uniforms.rain_color.rgb, uniforms.fog_color.rgb, in.fog);
    return vec4<f32>(color, uniforms.rain_color.a * edge);
}
"#;

/// Scales an offscreen frame onto the window surface with a fullscreen triangle
pub const BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@group(0) @binding(0) var source: texture_2d<f32>;
@group(0) @binding(1) var source_sampler: sampler;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var out: VertexOutput;
    let uv = vec2<f32>(f32((vertex_index << 1u) & 2u), f32(vertex_index & 2u));
    out.position = vec4<f32>(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(source, source_sampler, in.uv);
}
"#;
