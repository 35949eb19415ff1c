use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `input` for line reading; `stdin` reads standard input, `.gz` files
/// are decompressed on the fly.
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("a.maf");
/// std::fs::write(&path, "# one\n# two\n").unwrap();
///
/// let reader = mafbed::reader(path.to_str().unwrap()).unwrap();
/// assert_eq!(std::io::BufRead::lines(reader).count(), 2);
/// assert!(mafbed::reader("no/such/file.maf").is_err());
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// First whitespace-separated field of every non-empty, non-comment line.
pub fn read_names(input: &str) -> anyhow::Result<Vec<String>> {
    let mut names = vec![];
    for line in reader(input)?.lines() {
        let line = line.with_context(|| format!("could not read {}", input))?;
        if line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.split_whitespace().next() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}
