use crate::cli::AnalyzeArgs;
use crate::config::{resolve_config, resolve_templates};
use crate::error::Result;
use crate::output::{render_summary, write_outputs};
use crate::ui::CliProgressHandler;
use bindmode::engine::progress::ProgressReporter;
use bindmode::workflows;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    info!("Resolving analysis configuration...");
    let config = resolve_config(args.config.as_deref(), &args.set_values)?;
    let registry = resolve_templates(args.templates.as_deref())?;

    let progress_handler = CliProgressHandler::new(!quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    if !quiet {
        println!("Starting binding mode analysis...");
    }
    info!(
        receptor = %args.receptor.display(),
        ligand = %args.ligand.display(),
        "Invoking the core analysis workflow..."
    );
    let result = workflows::analyze::run_with_registry(
        &args.receptor,
        &args.ligand,
        &registry,
        &config,
        &reporter,
    )?;

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    if result.report.is_empty() {
        warn!("Analysis completed but found no receptor-ligand interactions.");
    }

    let files = write_outputs(&args.output, &result, !args.no_csv)?;
    if !quiet {
        println!("{}", render_summary(&result, &files));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use bindmode::engine::error::AnalysisError;
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    const RECEPTOR: &str = "\
ATOM      1  CE  LYS A  42       5.100   0.000   0.000  1.00  0.00           C
ATOM      2  NZ  LYS A  42       3.630   0.000   0.000  1.00  0.00           N
";

    const LIGAND: &str = "\
HETATM    1  C1  UNL     1      -1.500   0.000   0.000  1.00  0.00           C
HETATM    2  C2  UNL     1       0.000   0.000   0.000  1.00  0.00           C
HETATM    3  O1  UNL     1       0.630   1.080   0.000  1.00  0.00           O
HETATM    4  O2  UNL     1       0.630  -1.080   0.000  1.00  0.00           O
";

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn args(dir: &TempDir, ligand: &str) -> AnalyzeArgs {
        let receptor_path = dir.path().join("receptor.pdb");
        let ligand_path = dir.path().join("ligand.pdb");
        fs::write(&receptor_path, RECEPTOR).unwrap();
        fs::write(&ligand_path, ligand).unwrap();
        AnalyzeArgs {
            receptor: receptor_path,
            ligand: ligand_path,
            output: dir.path().join("out"),
            config: None,
            templates: None,
            set_values: Vec::new(),
            no_csv: false,
        }
    }

    #[test]
    fn analysis_writes_report_and_residue_table() {
        let dir = TempDir::new().unwrap();
        run(args(&dir, LIGAND), true).unwrap();

        let report: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("out/report.json")).unwrap()).unwrap();
        assert_eq!(report["salt_bridges"].as_array().unwrap().len(), 1);
        assert_eq!(report["summary"]["interaction_counts"]["salt_bridges"], 1);

        let csv = fs::read_to_string(dir.path().join("out/binding_mode_summary.csv")).unwrap();
        assert!(csv.starts_with("interaction_type,receptor_residue\n"));
        assert!(csv.contains("salt_bridges,A:LYS42\n"));
    }

    #[test]
    fn overrides_change_the_result() {
        let dir = TempDir::new().unwrap();
        let mut analyze_args = args(&dir, LIGAND);
        analyze_args.set_values = vec!["salt_bridge_dist_cutoff=2.5".to_string()];
        run(analyze_args, true).unwrap();

        let report: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("out/report.json")).unwrap()).unwrap();
        assert_eq!(report["salt_bridges"], serde_json::json!([]));
    }

    #[test]
    fn ligand_without_atoms_fails_with_its_role() {
        let dir = TempDir::new().unwrap();
        let result = run(args(&dir, "REMARK empty\n"), true);
        assert!(matches!(
            result,
            Err(CliError::Analysis(AnalysisError::Parse { .. }))
        ));
        assert!(!dir.path().join("out/report.json").exists());
    }

    #[test]
    fn loader_warnings_are_logged_once() {
        let dir = TempDir::new().unwrap();
        let ligand = format!(
            "{LIGAND}ENDMDL\nHETATM    5  C1  UNL     1       9.000   9.000   9.000  1.00  0.00           C\n"
        );
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || run(args(&dir, &ligand), true).unwrap());

        let output = log.contents();
        assert_eq!(output.matches("only the first model was analyzed").count(), 1);
    }
}
