use basepot::core::io::table::{
    load_pair_tables, read_potential, save_pair_tables, write_potential, write_score,
};
use basepot::core::potential::binning::BinScheme;
use basepot::core::potential::scoring::MissingEnergyPolicy;
use basepot::engine::config::PotentialConfigBuilder;
use basepot::engine::progress::ProgressReporter;
use basepot::workflows::{score, train};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const TOLERANCE: f64 = 1e-9;

fn write_pdb(dir: &Path, name: &str, residues: &[(&str, i32, [f64; 3])]) -> PathBuf {
    let mut content = String::from("HEADER    RNA\n");
    for (serial, &(res_name, res_seq, [x, y, z])) in residues.iter().enumerate() {
        // A non-representative atom that must be ignored.
        content.push_str(&format!(
            "ATOM  {:>5} {:<4} {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           P\n",
            serial * 2 + 1,
            "P",
            res_name,
            res_seq,
            x + 1.0,
            y,
            z
        ));
        content.push_str(&format!(
            "ATOM  {:>5} {:<4} {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C\n",
            serial * 2 + 2,
            "C3'",
            res_name,
            res_seq,
            x,
            y,
            z
        ));
    }
    content.push_str("END\n");
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn corpus(dir: &Path) -> Vec<PathBuf> {
    vec![
        // AU at 5.5, AC at 12.0, UC at 6.5
        write_pdb(
            dir,
            "one.pdb",
            &[
                ("A", 1, [0.0, 0.0, 0.0]),
                ("U", 4, [5.5, 0.0, 0.0]),
                ("C", 8, [12.0, 0.0, 0.0]),
            ],
        ),
        // AU at 5.2, GG at 9.0
        write_pdb(
            dir,
            "two.pdb",
            &[
                ("A", 1, [0.0, 0.0, 0.0]),
                ("U", 5, [0.0, 5.2, 0.0]),
                ("G", 20, [0.0, 0.0, 30.0]),
                ("G", 24, [0.0, 0.0, 39.0]),
            ],
        ),
    ]
}

#[test]
fn trained_potential_survives_both_table_formats_and_scores_new_structures() {
    let dir = tempdir().unwrap();
    let config = PotentialConfigBuilder::new().build().unwrap();
    let paths = corpus(dir.path());

    let training = train::run(&paths, &config, &ProgressReporter::new()).unwrap();
    assert_eq!(training.structures, 2);
    assert_eq!(training.frequencies.grand_total(), 5);

    // Per-pair files.
    let tables_dir = dir.path().join("tables");
    let written = save_pair_tables(&tables_dir, "test", &training.potential).unwrap();
    assert_eq!(written.len(), 10);
    let from_dir = load_pair_tables(&tables_dir, BinScheme::default()).unwrap();
    assert_eq!(from_dir, training.potential);

    // Combined file.
    let combined_path = dir.path().join("potential.tsv");
    write_potential(File::create(&combined_path).unwrap(), &training.potential).unwrap();
    let from_file = read_potential(
        BufReader::new(File::open(&combined_path).unwrap()),
        BinScheme::default(),
    )
    .unwrap();
    assert_eq!(from_file, training.potential);

    // AU: both observations in bin 5, where 2 of 5 corpus observations fall.
    let target = write_pdb(
        dir.path(),
        "target.pdb",
        &[("A", 3, [0.0, 0.0, 0.0]), ("U", 9, [0.0, 0.0, 5.9])],
    );
    let reports = score::run(
        &[target],
        &from_file,
        &config.pair_filter,
        MissingEnergyPolicy::Fail,
        &ProgressReporter::new(),
    );
    let result = reports[0].result.as_ref().unwrap();
    assert_eq!(result.pairs.len(), 1);
    assert!((result.total - (-(2.5f64).log10())).abs() < TOLERANCE);

    let mut buffer = Vec::new();
    write_score(&mut buffer, result, from_file.scheme()).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("Base Pair\tDistance Bin\tPseudoenergy Prediction\nAU\t5-6\t"));
    assert!(text.ends_with(&format!("\n\nResulting Gibbs free energy: {}\n", result.total)));
}

#[test]
fn missing_energies_fail_by_default_and_take_the_penalty_when_configured() {
    let dir = tempdir().unwrap();
    let config = PotentialConfigBuilder::new().build().unwrap();
    let training = train::run(&corpus(dir.path()), &config, &ProgressReporter::new()).unwrap();

    // CG was never observed, so every CG cell is undefined.
    let target = write_pdb(
        dir.path(),
        "target.pdb",
        &[("C", 1, [0.0, 0.0, 0.0]), ("G", 7, [3.0, 0.0, 0.0])],
    );

    let strict = score::score_structure(
        &target,
        &training.potential,
        &config.pair_filter,
        MissingEnergyPolicy::Fail,
    );
    assert!(strict.is_err());

    let lenient = score::score_structure(
        &target,
        &training.potential,
        &config.pair_filter,
        MissingEnergyPolicy::Penalty(1.5),
    )
    .unwrap();
    assert_eq!(lenient.total, 1.5);
    assert_eq!(lenient.substituted_count(), 1);
}
