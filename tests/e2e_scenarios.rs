//! End-to-end scenarios: Parse → Validate → Report, from raw editor JSON.

use validator::catalog;
use validator::issue::Severity;
use validator::parse;
use validator::validate;

#[allow(dead_code)]
mod helpers;
use helpers::{conn, node, workflow};

/// A small design with one finding of every severity: a wire into a node that
/// does not exist, a 5V supply on a 3.3V pin, an i2c bus with no pull-ups and
/// a sensor that is not wired up at all.
const MIXED_WORKFLOW: &str = r#"{
  "nodes": [
    { "id": "p1", "moduleId": "power_5v", "label": "5V supply" },
    { "id": "m1", "moduleId": "mcu_stm32", "label": "Main MCU" },
    { "id": "t1", "moduleId": "sensor_temp", "label": "Temp sensor" }
  ],
  "connections": [
    {
      "id": "c1",
      "from": { "nodeId": "p1", "portId": "vout_5v" },
      "to": { "nodeId": "m1", "portId": "vdd" }
    },
    {
      "id": "c2",
      "from": { "nodeId": "m1", "portId": "i2c0" },
      "to": { "nodeId": "ghost-1", "portId": "i2c" }
    }
  ]
}"#;

#[test]
fn empty_workflow_has_no_issues() {
    let workflow = parse::parse_workflow(r#"{ "nodes": [], "connections": [] }"#).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());
    assert!(issues.is_empty(), "got: {:?}", issues);
}

#[test]
fn single_node_design_reports_only_isolation() {
    let json = r#"{
      "nodes": [{ "id": "power-1", "moduleId": "power_5v", "label": "Bench supply" }],
      "connections": []
    }"#;
    let workflow = parse::parse_workflow(json).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());

    assert_eq!(issues.len(), 1, "got: {:?}", issues);
    assert_eq!(issues[0].id, "isolated-module:power-1");
    assert_eq!(issues[0].severity, Severity::Info);
}

#[test]
fn direct_5v_supply_into_mcu_warns_on_voltage() {
    let json = r#"{
      "nodes": [
        { "id": "power-1", "moduleId": "power_5v", "label": "Bench supply" },
        { "id": "mcu-1", "moduleId": "mcu_stm32", "label": "MCU" }
      ],
      "connections": [
        {
          "id": "c1",
          "from": { "nodeId": "power-1", "portId": "vout_5v" },
          "to": { "nodeId": "mcu-1", "portId": "vdd" }
        }
      ]
    }"#;
    let workflow = parse::parse_workflow(json).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());

    assert_eq!(issues.len(), 1, "got: {:?}", issues);
    assert_eq!(issues[0].id, "voltage-mismatch:c1");
    assert_eq!(issues[0].severity, Severity::Warning);
    assert!(issues[0].message.contains("5V") && issues[0].message.contains("3.3V"));
}

#[test]
fn i2c_sensor_needs_pullup_quick_fix() {
    let json = r#"{
      "nodes": [
        { "id": "mcu-1", "moduleId": "mcu_stm32", "label": "MCU" },
        { "id": "temp-1", "moduleId": "sensor_temp", "label": "Temp" }
      ],
      "connections": [
        {
          "id": "c1",
          "from": { "nodeId": "mcu-1", "portId": "i2c0" },
          "to": { "nodeId": "temp-1", "portId": "i2c" }
        }
      ]
    }"#;
    let workflow = parse::parse_workflow(json).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());

    // The id is what the front-end matches for its one-click fix, so it must
    // be the bare rule code.
    assert_eq!(issues.len(), 1, "got: {:?}", issues);
    assert_eq!(issues[0].id, "i2c-pullup-missing");
    assert_eq!(issues[0].severity, Severity::Warning);

    // The quick fix drops a pull-up pack onto the bus; the design is clean
    // afterwards.
    let fixed = r#"{
      "nodes": [
        { "id": "mcu-1", "moduleId": "mcu_stm32", "label": "MCU" },
        { "id": "temp-1", "moduleId": "sensor_temp", "label": "Temp" },
        { "id": "pullup-1", "moduleId": "glue_i2c_pullup", "label": "Pull-ups" }
      ],
      "connections": [
        {
          "id": "c1",
          "from": { "nodeId": "mcu-1", "portId": "i2c0" },
          "to": { "nodeId": "temp-1", "portId": "i2c" }
        },
        {
          "id": "c2",
          "from": { "nodeId": "mcu-1", "portId": "i2c0" },
          "to": { "nodeId": "pullup-1", "portId": "i2c" }
        }
      ]
    }"#;
    let workflow = parse::parse_workflow(fixed).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());
    assert!(issues.is_empty(), "got: {:?}", issues);
}

#[test]
fn dangling_connection_is_an_error_not_a_panic() {
    let json = r#"{
      "nodes": [{ "id": "mcu-1", "moduleId": "mcu_stm32", "label": "MCU" }],
      "connections": [
        {
          "id": "c1",
          "from": { "nodeId": "mcu-1", "portId": "i2c0" },
          "to": { "nodeId": "ghost-1", "portId": "i2c" }
        }
      ]
    }"#;
    let workflow = parse::parse_workflow(json).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());

    let errors: Vec<_> = issues.iter().filter(|i| i.severity == Severity::Error).collect();
    assert_eq!(errors.len(), 1, "got: {:?}", issues);
    assert_eq!(errors[0].id, "dangling-reference:c1");
    assert_eq!(errors[0].connection_id.as_deref(), Some("c1"));
    // Errors sort ahead of the pull-up warning the live i2c end still raises.
    assert_eq!(issues[0].severity, Severity::Error);

    // Nothing resolvable at all: still a report, never a crash.
    let json = r#"{
      "nodes": [{ "id": "x1", "moduleId": "discontinued_part", "label": "?" }],
      "connections": [
        {
          "id": "c1",
          "from": { "nodeId": "x1", "portId": "p" },
          "to": { "nodeId": "ghost-1", "portId": "q" }
        }
      ]
    }"#;
    let workflow = parse::parse_workflow(json).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());
    assert_eq!(issues.len(), 1, "got: {:?}", issues);
    assert_eq!(issues[0].id, "dangling-reference:c1");
}

#[test]
fn report_is_sorted_and_deterministic() {
    let workflow = parse::parse_workflow(MIXED_WORKFLOW).unwrap();
    let catalog = catalog::builtin_catalog();

    let issues = validate::validate_workflow(&workflow, &catalog);
    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "dangling-reference:c2",
            "voltage-mismatch:c1",
            "i2c-pullup-missing",
            "isolated-module:t1",
        ],
        "got: {:?}",
        issues
    );
    assert!(
        issues.windows(2).all(|w| w[0].severity <= w[1].severity),
        "errors first, info last: {:?}",
        issues
    );

    // Same input, same report, down to the ordering.
    let again = validate::validate_workflow(&workflow, &catalog);
    assert_eq!(issues, again);
}

#[test]
fn mixed_findings_render_stable_report() {
    let workflow = parse::parse_workflow(MIXED_WORKFLOW).unwrap();
    let issues = validate::validate_workflow(&workflow, &catalog::builtin_catalog());
    let report = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(report, @r"
    [error:dangling-reference:c2] Connection endpoint cannot be resolved: node 'ghost-1' does not exist in the workflow (connection 'c2')
    [warning:voltage-mismatch:c1] Voltage mismatch: 'p1:vout_5v' supplies 5V but 'm1:vdd' expects 3.3V (connection 'c1')
    [warning:i2c-pullup-missing] I2C bus in use but no pull-up pack present; SDA/SCL need pull-up resistors
    [info:isolated-module:t1] Module 'Temp sensor' is not connected to anything (node 't1')
    ");
}

#[test]
fn removing_a_wire_leaves_other_findings_untouched() {
    let catalog = catalog::builtin_catalog();
    let nodes = vec![
        node("p1", "power_5v"),
        node("m1", "mcu_stm32"),
        node("relay-1", "actuator_relay"),
    ];
    let with_both = workflow(
        nodes.clone(),
        vec![
            conn("c1", "p1", "vout_5v", "m1", "vdd"),
            conn("c2", "m1", "gpio0", "relay-1", "ctrl"),
        ],
    );
    let with_one = workflow(nodes, vec![conn("c1", "p1", "vout_5v", "m1", "vdd")]);

    let full = validate::validate_workflow(&with_both, &catalog);
    let reduced = validate::validate_workflow(&with_one, &catalog);

    // Per-connection findings for c1 are untouched by what happens to c2.
    let c1_full: Vec<_> = full
        .iter()
        .filter(|i| i.connection_id.as_deref() == Some("c1"))
        .collect();
    let c1_reduced: Vec<_> = reduced
        .iter()
        .filter(|i| i.connection_id.as_deref() == Some("c1"))
        .collect();
    assert_eq!(c1_full, c1_reduced);
    assert_eq!(c1_full.len(), 1, "got: {:?}", full);
    assert_eq!(c1_full[0].id, "voltage-mismatch:c1");
}

#[test]
fn catalog_lookups_return_stable_references() {
    let catalog = catalog::builtin_catalog();
    let first = catalog::get_module_by_id(&catalog, "mcu_stm32").unwrap();
    let second = catalog::get_module_by_id(&catalog, "mcu_stm32").unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(catalog::get_module_by_id(&catalog, "no_such_module").is_none());
}
