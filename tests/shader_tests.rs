//! Validates the particle shader with naga, without a GPU.

use nexus_particles::gpu::{InstanceRaw, SHADER_SOURCE};

fn parse() -> naga::Module {
    naga::front::wgsl::parse_str(SHADER_SOURCE).unwrap_or_else(|e| panic!("WGSL parse error: {:?}", e))
}

#[test]
fn test_shader_validates() {
    let module = parse();
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation error: {:?}", e);
    }
}

#[test]
fn test_shader_entry_points() {
    let module = parse();
    let names: Vec<(&str, naga::ShaderStage)> = module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect();
    assert!(names.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(names.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_vertex_inputs_match_instance_layout() {
    let module = parse();
    let vs = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "vs_main")
        .expect("vs_main");

    let locations: Vec<u32> = vs
        .function
        .arguments
        .iter()
        .filter_map(|arg| match &arg.binding {
            Some(naga::Binding::Location { location, .. }) => Some(*location),
            _ => None,
        })
        .collect();
    let expected: Vec<u32> = InstanceRaw::ATTRIBUTES.iter().map(|a| a.shader_location).collect();
    assert_eq!(locations, expected);
}
