extern crate stache;
use stache::{Template, Context, PartialMap, YamlValue};

use std::fs;
use serde::Deserialize;
use serde_yaml::Mapping as YamlMapping;

#[test]
fn interpolation_test() -> Result<(), String> {
    run_spec_file("interpolation.yml", false)
}

#[test]
fn comments_test() -> Result<(), String> {
    run_spec_file("comments.yml", false)
}

#[test]
fn sections_test() -> Result<(), String> {
    run_spec_file("sections.yml", false)
}

#[test]
fn inverted_test() -> Result<(), String> {
    run_spec_file("inverted.yml", false)
}

#[test]
fn assertion_test() -> Result<(), String> {
    run_spec_file("assertion.yml", false)
}

#[test]
fn paths_test() -> Result<(), String> {
    run_spec_file("paths.yml", false)
}

#[test]
fn delimiters_test() -> Result<(), String> {
    run_spec_file("delimiters.yml", false)
}

#[test]
fn partials_test() -> Result<(), String> {
    run_spec_file("partials.yml", false)
}


fn run_spec_file(path: &str, log: bool) -> Result<(), String> {
    yaml_spec(path)?
        .tests
        .iter()
        .fold(
            Ok(()),
            |acc, test| match (acc, run_spec_test(test, log)) {
                (acc, Ok(())) => acc,
                (Ok(()), Err(name)) => Err(format!("specs ({}): {}", path, name)),
                (Err(err), Err(name)) => Err(format!("{}, {}", err, name))
            }
        )
}

#[derive(Deserialize, Debug)]
struct YamlSpecFile {
    tests: Vec<YamlTestSpec>,
}

#[derive(Deserialize, Debug)]
struct YamlTestSpec {
    name: String,
    data: YamlValue,
    template: String,
    partials: Option<YamlMapping>,
    expected: String,
}

fn yaml_spec(name: &str) -> Result<YamlSpecFile, String> {
    let path = format!("tests/specs/{}", name);
    let text = fs::read_to_string(path).map_err(
        |err| format!("io: {}", err)
    )?;
    serde_yaml::from_str::<YamlSpecFile>(&text).map_err(
        |err| format!("yaml: {}", err)
    )
}

fn run_spec_test(test: &YamlTestSpec, log: bool) -> Result<(), String> {
    let template = Template::from(&test.template).map_err(
        |err| format!("{}: {}", test.name, err)
    )?;
    let partials = test.partials.iter()
        .flatten()
        .filter_map(|(name, text)| Some((name.as_str()?, text.as_str()?)))
        .collect::<PartialMap>();
    let result = template.render_with_partials(&Context::from(&test.data), &partials)
        .map_err(|err| format!("{}: {}", test.name, err))?;
    if result != test.expected {
        if log {
            println!("{}: fail", test.name);
            println!("expected:\n{}", test.expected);
            println!("received:\n{}\n", result);
        };
        Err(test.name.clone())
    } else {
        if log {
            println!("{}: ok", test.name);
        }
        Ok(())
    }
}
