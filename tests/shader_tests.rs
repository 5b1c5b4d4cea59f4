// Host-side validation of the particle WGSL with naga, so shader errors show
// up without a browser or GPU.

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, ShaderStage};
use std::collections::BTreeSet;

fn parse_and_validate(source: &str) -> (naga::Module, naga::valid::ModuleInfo) {
    let module = wgsl::parse_str(source).unwrap_or_else(|err| {
        panic!("particles WGSL parse failed: {err}");
    });
    let info = Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .unwrap_or_else(|err| {
            panic!("particles WGSL validation failed: {err}");
        });
    (module, info)
}

fn entry_point<'a>(
    module: &'a naga::Module,
    stage: ShaderStage,
    name: &str,
) -> &'a naga::EntryPoint {
    module
        .entry_points
        .iter()
        .find(|entry| entry.stage == stage && entry.name == name)
        .unwrap_or_else(|| panic!("missing entry point {stage:?}:{name}"))
}

#[test]
fn particles_shader_validates() {
    let (module, _info) = parse_and_validate(hero_core::PARTICLES_WGSL);
    entry_point(&module, ShaderStage::Vertex, "vs_main");
    entry_point(&module, ShaderStage::Fragment, "fs_main");
}

#[test]
fn vertex_stage_reads_position_and_color_slots() {
    let (module, _info) = parse_and_validate(hero_core::PARTICLES_WGSL);
    let vs = entry_point(&module, ShaderStage::Vertex, "vs_main");
    let locations: BTreeSet<u32> = vs
        .function
        .arguments
        .iter()
        .filter_map(|arg| match arg.binding {
            Some(Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();
    assert_eq!(locations, BTreeSet::from([0, 1]));
}

#[test]
fn single_uniform_block_matches_host_layout() {
    let (module, _info) = parse_and_validate(hero_core::PARTICLES_WGSL);
    let uniforms: Vec<_> = module
        .global_variables
        .iter()
        .filter(|(_, g)| g.space == AddressSpace::Uniform)
        .collect();
    assert_eq!(uniforms.len(), 1);

    let (_, global) = uniforms[0];
    let binding = global.binding.as_ref().expect("uniform binding");
    assert_eq!((binding.group, binding.binding), (0, 0));

    // Three mat4, a vec2 and six scalars: 3 * 64 + 8 + 24.
    let size = module.types[global.ty].inner.size(module.to_ctx());
    assert_eq!(size, 224);
}

#[test]
fn shader_stays_within_webgl2_limits() {
    let (module, _info) = parse_and_validate(hero_core::PARTICLES_WGSL);
    // WebGL2 has no storage buffers and guarantees 16 KiB uniform blocks.
    let storage = module
        .global_variables
        .iter()
        .filter(|(_, g)| matches!(g.space, AddressSpace::Storage { .. }))
        .count();
    assert_eq!(storage, 0);
    for (_, global) in module.global_variables.iter() {
        let size = module.types[global.ty].inner.size(module.to_ctx());
        assert!(size <= 16 * 1024, "{:?} is {size} bytes", global.name);
    }
}
