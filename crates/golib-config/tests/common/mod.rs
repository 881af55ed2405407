//! Shared sample configuration used across the integration tests.
//!
//! The same document is provided in all three formats. The expected raw trees
//! differ only in number representation: JSON numbers are floats, YAML and
//! TOML keep integers.

#![allow(dead_code)]

use golib_config::{convert_struct, mapping, Config, ConfigReader, Mapping, Value};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleConfig {
    pub name: String,
    pub profile: UserProfile,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserProfile {
    pub sex: String,
    pub age: i32,
    pub married: bool,
    pub children: Vec<ChildProfile>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChildProfile {
    pub name: String,
    pub weight: f32,
    pub age: i8,
}

convert_struct!(SampleConfig { name, profile });
convert_struct!(UserProfile { sex, age, married, children });
convert_struct!(ChildProfile { name, weight, age });

pub const SAMPLE_JSON: &str = r#"{
  "name": "Peter",
  "profile": {
    "sex": "m",
    "age": 32,
    "married": true,
    "children": [
      { "name": "George", "weight": 5.4, "age": 5},
      { "name": "Olivia", "weight": 12.2, "age": 12}
    ]
  }
}"#;

pub const SAMPLE_YAML: &str = "
name: Peter
profile:
  sex: m
  age: 32
  married: true
  children:
    - name: George
      weight: 5.4
      age: 5
    - name: Olivia
      weight: 12.2
      age: 12
";

pub const SAMPLE_TOML: &str = r#"
name = "Peter"

[profile]
sex = "m"
age = 32
married = true

[[profile.children]]
name = "George"
weight = 5.4
age = 5

[[profile.children]]
name = "Olivia"
weight = 12.2
age = 12
"#;

pub const WRONG_JSON: &str = "{\n  \"name\": \"Peter\",\n";
pub const WRONG_YAML: &str = "\nname: - Peter\n";
pub const WRONG_TOML: &str = "\nname = Peter\n";

pub fn expected_config() -> SampleConfig {
    SampleConfig {
        name: "Peter".into(),
        profile: UserProfile {
            sex: "m".into(),
            age: 32,
            married: true,
            children: vec![
                ChildProfile {
                    name: "George".into(),
                    weight: 5.4,
                    age: 5,
                },
                ChildProfile {
                    name: "Olivia".into(),
                    weight: 12.2,
                    age: 12,
                },
            ],
        },
    }
}

/// The raw tree every encoder should produce, with numbers built by `num`.
fn expected_raw(num: fn(i64) -> Value) -> Mapping {
    let child = |name: &str, weight: f64, age: i64| {
        Value::from(mapping! { "name" => name, "weight" => weight, "age" => num(age) })
    };
    mapping! {
        "name" => "Peter",
        "profile" => mapping! {
            "sex" => "m",
            "age" => num(32),
            "married" => true,
            "children" => vec![child("George", 5.4, 5), child("Olivia", 12.2, 12)],
        },
    }
}

pub fn expected_raw_json() -> Mapping {
    expected_raw(|n| Value::Float(n as f64))
}

pub fn expected_raw_integers() -> Mapping {
    expected_raw(Value::Integer)
}

/// Check a configuration built from the sample document against the expected
/// raw tree and typed result.
pub fn check_sample_config(cfg: &Config, expected_raw: Mapping) {
    let children = expected_raw["profile"].as_mapping().unwrap()["children"].clone();
    let expected_raw = Value::Mapping(expected_raw);

    assert_eq!(cfg.raw(), &expected_raw);
    assert_eq!(cfg.raw_by_key("").unwrap(), &expected_raw);
    assert_eq!(cfg.raw_by_key("profile.children").unwrap(), &children);
    assert_eq!(cfg.raw_by_key(".profile.children").unwrap(), &children);

    let mut data = SampleConfig::default();
    cfg.get(&mut data).unwrap();
    assert_eq!(data, expected_config());

    let mut kids: Vec<ChildProfile> = Vec::new();
    cfg.get_by_key("profile.children", &mut kids).unwrap();
    assert_eq!(kids, expected_config().profile.children);

    cfg.get_by_key(".profile.children", &mut kids).unwrap();
    assert_eq!(kids, expected_config().profile.children);
}
