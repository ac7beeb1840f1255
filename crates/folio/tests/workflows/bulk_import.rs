use super::*;

fn records() -> Vec<Record> {
  ["Alpha", "Beta", "Gamma"]
    .into_iter()
    .enumerate()
    .map(|(i, title)| [("title", Value::from(title)), ("n", Value::from(i as i64))].into_iter().collect())
    .collect()
}

#[test]
fn test_export_then_bulk_import() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("export.yaml");
  let exported = records();
  yaml::serialize_many(&exported, &path, &YamlOptions::default())?;

  let loaded = bulk::load(&path, Strictness::Lenient)?;
  assert_eq!(loaded, exported);

  let (config, _library_dir) = test_config();
  let library = config.library();
  for record in loaded {
    library.add(record, &[], &config.yaml_options())?;
  }
  let titles: Vec<String> = library.documents()?.iter().map(|document| document.title()).collect();
  assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
  Ok(())
}

#[test]
fn test_exporter_text_loads_back() -> TestResult<()> {
  let text = yaml::exporter(&records())?;
  assert_eq!(bulk::load_str(&text, Strictness::Strict)?, records());
  Ok(())
}

#[traced_test]
#[test]
fn test_broken_bulk_file_degrades_to_nothing() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("bulk.yaml");
  fs::write(&path, "---\ntitle: ok\n---\ntitle: \"unterminated\n")?;
  assert!(bulk::load(&path, Strictness::Lenient)?.is_empty());
  assert!(bulk::load(dir.path().join("missing.yaml"), Strictness::Lenient).is_err());
  Ok(())
}
