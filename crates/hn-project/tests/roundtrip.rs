use hn_project::*;

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/booster_line.yaml")
}

fn two_vertex_network() -> NetworkDef {
    NetworkDef {
        version: 1,
        name: "Single pipe".to_string(),
        liquid: LiquidDef::Custom {
            name: "Brine".to_string(),
            density_kg_m3: 1100.0,
            viscosity_pa_s: 1.5e-3,
        },
        vertices: vec![
            VertexDef {
                id: "in".to_string(),
                name: "Inlet".to_string(),
                liquid: None,
            },
            VertexDef {
                id: "out".to_string(),
                name: "Outlet".to_string(),
                liquid: Some(LiquidDef::Named {
                    name: "oil".to_string(),
                }),
            },
        ],
        components: vec![ComponentDef {
            id: "p1".to_string(),
            name: "Pipe".to_string(),
            kind: ComponentKind::Pipe {
                length_m: 5.0,
                diameter_m: 0.025,
                roughness_m: 1e-5,
                k_minor: 0.0,
            },
            from_vertex_id: "in".to_string(),
            to_vertex_id: "out".to_string(),
        }],
        boundaries: vec![BoundaryDef {
            vertex_id: "in".to_string(),
            speed_m_s: Some(0.8),
            static_pressure_pa: Some(2.0e5),
        }],
        initial_guess: None,
    }
}

#[test]
fn roundtrip_yaml_simple_network() {
    let network = two_vertex_network();
    validate_network(&network).unwrap();

    let path = std::env::temp_dir().join("hn_project_roundtrip_simple.yaml");
    save_yaml(&path, &network).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(network, loaded);
}

#[test]
fn roundtrip_json_simple_network() {
    let network = two_vertex_network();
    let path = std::env::temp_dir().join("hn_project_roundtrip_simple.json");
    save_json(&path, &network).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(network, loaded);
}

#[test]
fn fixture_loads_from_file_and_string() {
    let from_file = load_yaml(&fixture_path()).unwrap();
    let content = std::fs::read_to_string(fixture_path()).unwrap();
    let from_str = from_yaml_str(&content).unwrap();
    assert_eq!(from_file, from_str);

    assert_eq!(from_file.vertices.len(), 4);
    assert_eq!(from_file.components.len(), 3);
    assert!(matches!(
        from_file.components[2].kind,
        ComponentKind::Valve {
            law: ValveLawDef::Quadratic,
            ..
        }
    ));
    assert!(from_file.initial_guess.is_some());
}

#[test]
fn missing_optional_fields_take_defaults() {
    let yaml = r#"
version: 1
name: Minimal
liquid:
  type: Named
  name: glycol
vertices:
  - id: a
    name: A
  - id: b
    name: B
components:
  - id: v
    name: Valve
    kind:
      type: Valve
      diameter_m: 0.02
      k_open: 1.0
      opening: 1.0
    from_vertex_id: a
    to_vertex_id: b
"#;
    let network = from_yaml_str(yaml).unwrap();
    assert!(network.boundaries.is_empty());
    assert!(network.vertices.iter().all(|v| v.liquid.is_none()));
    assert!(matches!(
        network.components[0].kind,
        ComponentKind::Valve {
            law: ValveLawDef::Linear,
            ..
        }
    ));
}

#[test]
fn load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("hn_project_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(ProjectError::Io(_))));
}

#[test]
fn malformed_yaml_is_yaml_error() {
    assert!(matches!(
        from_yaml_str("version: [not, a, number]"),
        Err(ProjectError::Yaml(_))
    ));
}
