use glint_runtime::prelude::*;
use glint_runtime::syntax::source::SourceFile;
use log::*;
use std::collections::BTreeMap;
use std::fs;

#[derive(serde::Deserialize)]
struct RenderTest {
    #[serde(default)]
    skip: bool,
    source: String,
    expected: String,
    #[serde(default)]
    globals: BTreeMap<String, toml::Value>,
    #[serde(default)]
    scoped: BTreeMap<String, toml::Value>,
    #[serde(default)]
    removed: Vec<String>,
}

impl RenderTest {
    fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }
}

fn to_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::Boolean(b) => Value::from(*b),
        toml::Value::Integer(i) => Value::from(*i as f64),
        toml::Value::Float(f) => Value::from(*f),
        other => Value::from(other.as_str().map(String::from).unwrap_or_else(|| other.to_string())),
    }
}

#[test]
pub fn run_all_tests() -> Result<(), Box<dyn std::error::Error>> {
    stderrlog::new().verbosity(3).init()?;

    let mut count = 0;

    for path in glob::glob("tests/render/**/*.toml")?.filter_map(Result::ok) {
        let test = RenderTest::load(&path)?;
        let src = SourceFile::named(path.display().to_string(), test.source.clone());

        if test.skip {
            info!("skipping test: {}", src.name());
            continue;
        }

        info!("running test: {}", src.name());

        let runtime = Runtime::new();
        for (name, value) in test.globals.iter() {
            runtime.set(name, to_value(value));
        }

        let scope = runtime.scope();
        for (name, value) in test.scoped.iter() {
            scope.set(name, to_value(value))?;
        }
        for name in test.removed.iter() {
            scope.remove(name)?;
        }

        let template = runtime.compile(src)?;
        let actual = runtime.run_in(&template, &scope)?;
        let expected = test.expected.as_str();

        if actual != expected {
            eprintln!("{}", difference::Changeset::new(expected, &actual, ""));
            panic!("rendered output of {} does not match expected output", path.display());
        }

        count += 1;
    }

    assert!(count > 0, "no render tests were found");

    Ok(())
}
