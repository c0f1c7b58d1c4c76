mod common;

use anyhow::Result;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

use common::*;

#[test]
fn test_cli_help_command() {
    let mut cmd = operon_cmd();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("select"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = operon_cmd();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("operon"));
}

#[test]
fn test_extract_basic_workflow() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_pair(ASSEMBLY, &create_rrna_gff(), &create_contig_fasta())?;

    env.extract_cmd()
        .args(["--genes", "16s,23s", "--feature-type", "rrna", "--max-len", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written"));

    let output = env.output_path(&format!("{}_16S-23S.fna", ASSEMBLY));
    assert!(output.exists(), "Output file should exist");

    let content = fs::read_to_string(&output)?;
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(">GCF_000123.4 Genus species strainX 16s-23s +")
    );
    let sequence: String = lines.collect();
    assert_eq!(sequence, contig_sequence()[9..200].to_string());
    Ok(())
}

#[test]
fn test_extract_uses_defaults() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_pair(ASSEMBLY, &create_rrna_gff(), &create_contig_fasta())?;

    env.extract_cmd().assert().success();

    assert_eq!(
        count_sequences(&env.output_path(&format!("{}_16S-23S.fna", ASSEMBLY)))?,
        1
    );
    Ok(())
}

#[test]
fn test_extract_without_clusters_writes_nothing() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_pair(ASSEMBLY, &create_rrna_gff(), &create_contig_fasta())?;

    env.extract_cmd()
        .args(["--genes", "16s,5s"])
        .assert()
        .success();

    assert!(env.output_dir.exists());
    assert_eq!(fs::read_dir(&env.output_dir)?.count(), 0);
    Ok(())
}

#[test]
fn test_extract_report() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_pair(ASSEMBLY, &create_rrna_gff(), &create_contig_fasta())?;
    let report = env.path("report.json");

    env.extract_cmd()
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    let pairs = json.as_array().expect("report should be an array");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0]["features"], 2);
    assert_eq!(pairs[0]["clusters"], 1);
    assert_eq!(pairs[0]["records"], 1);
    Ok(())
}

#[test]
fn test_extract_bad_file_name_continues_batch() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_pair(ASSEMBLY, &create_rrna_gff(), &create_contig_fasta())?;
    env.add_pair("genome", &create_rrna_gff(), &create_contig_fasta())?;

    env.extract_cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 file pairs failed"));

    // The well-named pair is still processed
    assert!(env
        .output_path(&format!("{}_16S-23S.fna", ASSEMBLY))
        .exists());
    assert!(!env.output_path("genome_16S-23S.fna").exists());
    Ok(())
}

#[test]
fn test_extract_write_config() -> Result<()> {
    let env = TestEnvironment::new()?;
    let config = env.path("operon.toml");

    env.extract_cmd()
        .args(["--genes", "16S,23S,5S", "--max-len", "7000"])
        .arg("--write-config")
        .arg(&config)
        .assert()
        .success();

    let saved = operon_core::load_config(&config)?;
    assert_eq!(saved.extraction.genes, vec!["16S", "23S", "5S"]);
    assert_eq!(saved.extraction.max_len, 7000);
    Ok(())
}

#[test]
fn test_extract_invalid_config_exit_code() -> Result<()> {
    let env = TestEnvironment::new()?;
    let config = env.path("broken.toml");
    fs::write(&config, "[extraction\nmax_len = ")?;

    env.extract_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(2);
    Ok(())
}

#[test]
fn test_extract_zero_max_len_exit_code() -> Result<()> {
    let env = TestEnvironment::new()?;

    env.extract_cmd()
        .args(["--max-len", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("max_len"));
    Ok(())
}

#[test]
fn test_select_command() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.path("assembly_summary.tsv");
    let output = env.path("selected.tsv");
    fs::write(
        &input,
        "Assembly Accession\tOrganism Name\tOrganism Infraspecific Names Strain\tAssembly Stats Total Sequence Length\tAssembly Stats Contig N50\tAssembly Stats GC Count\tAssembly Stats GC Percent\n\
         GCF_1\tEscherichia coli K-12\tK-12\t4641652\t4641652\t2354364\t50.5\n\
         GCF_2\tEscherichia coli Sakai\tSakai\t5594605\t5498578\t2828240\t50.5\n",
    )?;

    operon_cmd()
        .arg("select")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Escherichia coli"));

    let content = fs::read_to_string(&output)?;
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().nth(1).unwrap().starts_with("GCF_2\t"));
    Ok(())
}

#[test]
fn test_select_missing_column_exit_code() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.path("summary.tsv");
    fs::write(&input, "Assembly Accession\tOrganism Name\nGCF_1\tEscherichia coli\n")?;

    operon_cmd()
        .arg("select")
        .arg(&input)
        .arg(env.path("out.tsv"))
        .assert()
        .failure()
        .code(4);
    Ok(())
}

#[test]
fn test_select_missing_input_exit_code() -> Result<()> {
    let env = TestEnvironment::new()?;

    operon_cmd()
        .arg("select")
        .arg(env.path("absent.tsv"))
        .arg(env.path("out.tsv"))
        .assert()
        .failure()
        .code(3);
    Ok(())
}
