use super::*;

const ACM_URL: &str = "https://dl.acm.org/doi/abs/10.1145/3456.7891?x=1";
const ACM_PDF: &str = "https://dl.acm.org/doi/pdf/10.1145/3456.7891";

#[test]
fn test_acm_import_into_library() -> TestResult<()> {
  let (config, _dir) = test_config();
  let session = MockSession::default().with(ACM_PDF, 200, b"%PDF-1.4 fake paper");

  let importer = Importers::default().matching(ACM_URL).ok_or("no importer matched")?;
  assert_eq!(importer.name(), "acm");
  let mut ctx = importer.fetch(&session)?;
  assert_eq!(session.requests(), vec![ACM_PDF.to_owned()]);
  let downloaded = ctx.downloads.clone();
  assert_eq!(downloaded.len(), 1);

  let mut data = ctx.data.clone().ok_or("no data")?;
  assert_eq!(data.get_str("doi"), Some("10.1145/3456.7891"));
  data.set("title", "A fetched paper");
  let document = config.library().add(data, &ctx.files, &config.yaml_options())?;
  ctx.remove_downloads()?;
  assert!(downloaded.iter().all(|path| !path.exists()));

  let reread = yaml::read(document.info_path(), Strictness::Strict)?;
  assert_eq!(reread.get_str("doi"), Some("10.1145/3456.7891"));
  assert_eq!(document.files().len(), 1);
  assert!(check(&document, &["doi", "title"]).is_ok());
  Ok(())
}

#[traced_test]
#[test]
fn test_missing_document_is_not_an_error() -> TestResult<()> {
  let session = MockSession::default();
  let ctx = Acm::matches(ACM_URL).ok_or("no match")?.fetch(&session)?;
  assert!(ctx.data.is_some());
  assert!(ctx.files.is_empty());
  assert!(!ctx.logs.is_empty());
  Ok(())
}

#[test]
fn test_each_fetch_starts_from_a_fresh_context() -> TestResult<()> {
  let session = MockSession::default().with(ACM_PDF, 200, b"<html>consent</html>");
  let acm = Acm::matches(ACM_URL).ok_or("no match")?;
  let first = acm.fetch(&session)?;
  let second = acm.fetch(&session)?;
  assert_eq!(first, second);
  assert_ne!(first, ImportContext::new());
  assert_eq!(acm.document_url().as_deref(), Some(ACM_PDF));
  Ok(())
}

#[test]
fn test_yaml_file_import_brings_files_along() -> TestResult<()> {
  let source = tempdir()?;
  fs::write(source.path().join("paper.pdf"), b"%PDF")?;
  let info = source.path().join("info.yaml");
  fs::write(&info, "title: Local paper\nauthor: Doe, Jane\nfiles:\n- paper.pdf\n")?;

  let importer = Importers::default().matching(info.to_str().ok_or("path")?).ok_or("no importer")?;
  let ctx = importer.fetch(&MockSession::default())?;
  assert_eq!(ctx.files, vec![source.path().join("paper.pdf")]);

  let (config, _dir) = test_config();
  let document = config.library().add(ctx.data.ok_or("no data")?, &ctx.files, &config.yaml_options())?;
  assert!(document.missing_files().is_empty());
  assert_eq!(document.data.get_str("author"), Some("Doe, Jane"));
  Ok(())
}
