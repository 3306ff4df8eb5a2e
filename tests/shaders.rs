use mandelzoom::{compute, uniform::Params};

fn validate(label: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|err| panic!("{} failed to parse: {:?}", label, err));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .unwrap_or_else(|err| panic!("{} failed validation: {:?}", label, err));
    module
}

fn entry_point<'a>(module: &'a naga::Module, name: &str) -> &'a naga::EntryPoint {
    module
        .entry_points
        .iter()
        .find(|entry_point| entry_point.name == name)
        .unwrap_or_else(|| panic!("missing entry point {}", name))
}

#[test]
fn compute_shader_validates() {
    let module = validate("compute.wgsl", include_str!("../src/compute.wgsl"));

    let mandelbrot = entry_point(&module, "mandelbrot");
    assert_eq!(mandelbrot.stage, naga::ShaderStage::Compute);
    assert_eq!(
        mandelbrot.workgroup_size,
        [
            compute::MANDELBROT_WORKGROUP_SIZE_X,
            compute::MANDELBROT_WORKGROUP_SIZE_Y,
            1
        ]
    );
}

#[test]
fn compute_shader_params_match_uniform_layout() {
    let module = validate("compute.wgsl", include_str!("../src/compute.wgsl"));

    let span = module
        .types
        .iter()
        .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
            (Some(name), naga::TypeInner::Struct { span, .. }) if name == "Params" => Some(*span),
            _ => None,
        })
        .expect("Params struct");
    assert_eq!(span as usize, std::mem::size_of::<Params>());

    let mut bindings: Vec<(u32, u32)> = module
        .global_variables
        .iter()
        .filter_map(|(_, global)| global.binding.as_ref())
        .map(|binding| (binding.group, binding.binding))
        .collect();
    bindings.sort();
    assert_eq!(bindings, [(0, 0), (0, 1)]);
}

#[test]
fn render_shader_validates() {
    let module = validate("shader.wgsl", include_str!("../src/shader.wgsl"));

    assert_eq!(
        entry_point(&module, "vertex_main").stage,
        naga::ShaderStage::Vertex
    );
    assert_eq!(
        entry_point(&module, "fragment_main").stage,
        naga::ShaderStage::Fragment
    );
}

#[test]
fn broken_shader_is_rejected() {
    let source = include_str!("../src/compute.wgsl").replace("return p;", "return p");
    assert!(naga::front::wgsl::parse_str(&source).is_err());
}
