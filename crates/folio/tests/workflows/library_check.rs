use super::*;

#[test]
fn test_check_library_documents() -> TestResult<()> {
  let (config, _dir) = test_config();
  let config = config.with_check_keys(["title", "year"]);
  let library = config.library();

  let complete: Record = [("title", Value::from("Complete")), ("year", Value::from(2021))].into_iter().collect();
  library.add(complete, &[], &config.yaml_options())?;
  let mut partial: Record = [("title", "Partial")].into_iter().collect();
  partial.set("files", vec![Value::from("lost.pdf")]);
  let partial = library.add(partial, &[], &config.yaml_options())?;

  let reports: Vec<_> =
    library.documents()?.iter().map(|document| check(document, config.check_keys.as_slice())).collect();
  let failing: Vec<_> = reports.iter().filter(|report| !report.is_ok()).collect();
  assert_eq!(failing.len(), 1);
  assert_eq!(failing[0].folder, partial.folder);
  assert_eq!(failing[0].problems, vec![
    Problem::MissingKey("year".to_owned()),
    Problem::MissingFile(partial.folder.join("lost.pdf")),
  ]);
  Ok(())
}

#[test]
fn test_config_round_trip_drives_the_library() -> TestResult<()> {
  let (config, dir) = test_config();
  let path: PathBuf = dir.path().join("config.toml");
  config.clone().with_allow_unicode(false).save(&path)?;

  let loaded = Config::load(&path)?;
  let document = loaded.library().add(
    [("title", "Café déjà vu")].into_iter().collect(),
    &[],
    &loaded.yaml_options(),
  )?;
  let text = fs::read_to_string(document.info_path())?;
  assert!(text.contains("Caf\\u00E9"));
  assert_eq!(yaml::read(document.info_path(), Strictness::Strict)?.get_str("title"), Some("Café déjà vu"));
  Ok(())
}
