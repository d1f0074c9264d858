//! JSON formatter.

use super::Formatter;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::io::{self, Write};
use upmscan_core::{Category, PackageRecord, PackageSummary};

pub struct JsonFormatter;

fn summaries(packages: &[PackageRecord]) -> Vec<PackageSummary> {
    packages.iter().map(PackageRecord::summary).collect()
}

fn write_pretty(out: &mut dyn Write, value: &impl serde::Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

impl Formatter for JsonFormatter {
    fn packages(&self, out: &mut dyn Write, packages: &[PackageRecord]) -> io::Result<()> {
        write_pretty(out, &summaries(packages))
    }

    fn groups(
        &self,
        out: &mut dyn Write,
        groups: &BTreeMap<Category, Vec<PackageRecord>>,
    ) -> io::Result<()> {
        let mut object = Map::new();
        for (category, packages) in groups {
            object.insert(
                category.cli_name().to_string(),
                serde_json::to_value(summaries(packages))?,
            );
        }
        write_pretty(out, &Value::Object(object))
    }

    fn cache_version(&self, out: &mut dyn Write, name: &str, version: &str) -> io::Result<()> {
        write_pretty(
            out,
            &json!({
                "name": name,
                "version": version,
                "found": !version.is_empty(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use upmscan_core::DeclaredValueResolver;

    fn record(name: &str, value: &str, category: Category) -> PackageRecord {
        PackageRecord::new(name, value, category, Rc::new(DeclaredValueResolver))
    }

    fn parse(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Value {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_packages_as_summaries() {
        let packages = vec![record(
            "com.me.tool",
            "git+https://github.com/me/tool.git#v2.0.0",
            Category::Git,
        )];
        let value = parse(|out| JsonFormatter.packages(out, &packages));

        assert_eq!(value[0]["name"], "com.me.tool");
        assert_eq!(value[0]["category"], "git");
        assert_eq!(value[0]["version"], "v2.0.0");
        assert_eq!(value[0]["display"], "com.me.tool@v2.0.0");
    }

    #[test]
    fn test_groups_keyed_by_cli_name_in_priority_order() {
        let mut groups = BTreeMap::new();
        groups.insert(
            Category::Standard,
            vec![record("com.company.lib", "0.3.0", Category::Standard)],
        );
        groups.insert(
            Category::OpenUpm,
            vec![record("com.cysharp.unitask", "2.5.4", Category::OpenUpm)],
        );
        let value = parse(|out| JsonFormatter.groups(out, &groups));

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["openupm", "standard"]);
        assert_eq!(value["standard"][0]["name"], "com.company.lib");
    }

    #[test]
    fn test_cache_version() {
        let value = parse(|out| JsonFormatter.cache_version(out, "com.unity.ugui", ""));
        assert_eq!(value["found"], false);
        assert_eq!(value["version"], "");
    }
}
