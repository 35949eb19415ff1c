use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

const MAF: &str = "\
##maf version=1 scoring=roast.v3.3
# three species, two chromosomes

a score=23262.0
s hg38.chr1     10 4 + 1000 ACGT
s panTro4.chr1  50 4 + 2000 ACGT

a score=5062.0
s hg38.chr1        20 3 + 1000 AC-T
s rheMac8.chr7    100 4 + 3000 AGCT
s panTro4.chr1     60 4 + 2000 AGCT

a score=11.0
s hg38.chr1       100 20 - 1000 AAAACCCCGGGGTTTTNNNN
s panTro4.chr1    200 20 - 2000 AAAACCCCGGGGTTTTNNNN

a score=99.0
s hg38.chr2       10 4 + 1000 ACGT
s rheMac8.chr7    70 4 + 3000 ACGT

";

fn write_maf(dir: &tempfile::TempDir, name: &str) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    let mut f = File::create(&path)?;
    f.write_all(MAF.as_bytes())?;
    Ok(path)
}

#[test]
fn command_to_bed_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("per-site multi-species BED"));
    Ok(())
}

#[test]
fn command_to_bed_identical_rows() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mafbed")?;
    let output = cmd
        .arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .arg("--species")
        .arg("panTro4")
        .write_stdin(MAF)
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    // 4 + 3 + 20
    assert_eq!(lines.len(), 27);
    assert_eq!(
        lines[0],
        "chr1\t10\t11\t+\thg38,panTro4\tchr1,chr1\t10,50\tA,A\t+,+\t23262.0"
    );
    assert_eq!(
        lines[3],
        "chr1\t13\t14\t+\thg38,panTro4\tchr1,chr1\t13,53\tT,T\t+,+\t23262.0"
    );
    assert!(!stdout.contains("rheMac8"));
    assert!(!stdout.contains("99.0"));

    Ok(())
}

#[test]
fn command_to_bed_indel_and_absent() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = write_maf(&dir, "input.maf")?;

    let mut cmd = Command::cargo_bin("mafbed")?;
    let output = cmd
        .arg("to-bed")
        .arg(&path)
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;

    // species collected from the file: reference first, then alphabetical
    assert!(stdout.lines().all(|l| l.contains("\thg38,panTro4,rheMac8\t")));

    assert!(stdout.contains(
        "chr1\t10\t11\t+\thg38,panTro4,rheMac8\tchr1,chr1,?\t10,50,?\tA,A,?\t+,+,?\t23262.0"
    ));
    // gap in the reference merged with the following column
    assert!(stdout.contains(
        "chr1\t22\t23\t+\thg38,panTro4,rheMac8\tchr1,chr1,chr7\tNA,62,102\t-T,CT,CT\t+,+,+\t5062.0"
    ));

    Ok(())
}

#[test]
fn command_to_bed_reverse_strand() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = write_maf(&dir, "input.maf")?;

    let mut cmd = Command::cargo_bin("mafbed")?;
    let output = cmd
        .arg("to-bed")
        .arg(&path)
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .arg("-s")
        .arg("panTro4")
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    let flipped: Vec<&str> = stdout.lines().filter(|l| l.ends_with("\t11.0")).collect();

    assert_eq!(flipped.len(), 20);
    // 1000 - 100 - 20 = 880, 2000 - 200 - 20 = 1780
    assert_eq!(
        flipped[0],
        "chr1\t880\t881\t+\thg38,panTro4\tchr1,chr1\t880,1780\tN,N\t+,+\t11.0"
    );
    assert!(flipped[19].starts_with("chr1\t899\t900\t+"));
    assert!(flipped[19].contains("\tT,T\t"));

    Ok(())
}

#[test]
fn command_to_bed_gz_and_outfile() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("input.maf.gz");
    {
        let file = File::create(&input)?;
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(MAF.as_bytes())?;
        encoder.finish()?;
    }
    let outfile = dir.path().join("out.tsv");

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg(&input)
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr2")
        .arg("-o")
        .arg(&outfile);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let out = std::fs::read_to_string(&outfile)?;
    assert_eq!(out.lines().count(), 4);
    assert!(out.starts_with(
        "chr2\t10\t11\t+\thg38,panTro4,rheMac8\tchr2,?,chr7\t10,?,70\tA,?,A\t+,?,+\t99.0\n"
    ));

    Ok(())
}

#[test]
fn command_to_bed_species_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let list = dir.path().join("species.txt");
    {
        let mut f = File::create(&list)?;
        writeln!(f, "rheMac8")?;
        writeln!(f, "hg38")?;
    }

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .arg("--species-file")
        .arg(&list)
        .write_stdin(MAF);
    cmd.assert().success().stdout(predicate::str::contains(
        "chr1\t10\t11\t+\thg38,rheMac8\tchr1,?\t10,?\tA,?\t+,?\t23262.0",
    ));

    Ok(())
}

#[test]
fn command_to_bed_no_match() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chrX")
        .arg("--species")
        .arg("panTro4")
        .write_stdin(MAF);
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_to_bed_bad_character() -> anyhow::Result<()> {
    let input = "a score=1\ns hg38.chr1 0 4 - 100 ACZT\n\n";

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .arg("--species")
        .arg("hg38")
        .write_stdin(input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("'Z'"))
        .stderr(predicate::str::contains("stdin"));

    Ok(())
}

#[test]
fn command_to_bed_parse_error() -> anyhow::Result<()> {
    let input = "a score=1\ns hg38.chr1 0 4 + 100\n\n";

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .arg("--species")
        .arg("hg38")
        .write_stdin(input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));

    Ok(())
}

#[test]
fn command_to_bed_configuration_errors() -> anyhow::Result<()> {
    // species can't be collected from a stream
    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("chr1")
        .write_stdin(MAF);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--species"));

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed")
        .arg("stdin")
        .arg("--ref")
        .arg("hg38")
        .arg("--chr")
        .arg("")
        .arg("--species")
        .arg("panTro4")
        .write_stdin(MAF);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no chromosome specified"));

    let mut cmd = Command::cargo_bin("mafbed")?;
    cmd.arg("to-bed").arg("stdin").arg("--ref").arg("hg38");
    cmd.assert().failure();

    Ok(())
}
