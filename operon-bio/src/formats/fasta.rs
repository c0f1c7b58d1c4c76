use crate::sequence::Sequence;
use flate2::read::GzDecoder;
use memmap2::Mmap;
use nom::{
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{line_ending, not_line_ending},
    combinator::{map_res, opt},
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use operon_core::{OperonError, OperonResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::is_gzipped;

/// Parse a FASTA header line; ids and descriptions must be UTF-8
fn parse_header(input: &[u8]) -> IResult<&[u8], (&str, Option<&str>)> {
    let (input, _) = tag(b">")(input)?;
    let (input, id) = map_res(
        take_till(|c: u8| c == b' ' || c == b'\t' || c == b'\n' || c == b'\r'),
        std::str::from_utf8,
    )(input)?;
    let (input, description) = opt(preceded(
        take_while1(|c: u8| c == b' ' || c == b'\t'),
        map_res(not_line_ending, std::str::from_utf8),
    ))(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, (id, description.map(str::trim_end))))
}

/// Parse sequence lines until next header or EOF
fn parse_sequence(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let mut sequence = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() && remaining[0] != b'>' {
        let (rest, line) =
            take_till::<_, _, nom::error::Error<_>>(|c: u8| c == b'\n' || c == b'\r')(remaining)?;
        let (rest, _) = opt(line_ending)(rest)?;

        // Lone carriage returns would otherwise stall the loop
        let rest = if rest.len() == remaining.len() {
            &rest[1..]
        } else {
            rest
        };

        sequence.extend(line.iter().copied().filter(|c| !c.is_ascii_whitespace()));
        remaining = rest;
    }

    Ok((remaining, sequence))
}

/// Parse a single FASTA record
fn parse_record(input: &[u8]) -> IResult<&[u8], Sequence> {
    let (input, (id, description)) = parse_header(input)?;
    let (input, sequence) = parse_sequence(input)?;

    let mut seq = Sequence::new(id.to_string(), sequence);
    if let Some(desc) = description.filter(|d| !d.is_empty()) {
        seq = seq.with_description(desc.to_string());
    }

    Ok((input, seq))
}

/// Parse FASTA from a byte buffer.
///
/// Text before the first header is ignored. Records without sequence data
/// are kept as empty sequences.
pub fn parse_fasta_from_bytes(data: &[u8]) -> OperonResult<Vec<Sequence>> {
    let mut input = data;
    let mut sequences = Vec::new();

    // Skip anything ahead of the first header
    while !input.is_empty() && input[0] != b'>' {
        input = match input.iter().position(|&c| c == b'\n') {
            Some(pos) => &input[pos + 1..],
            None => &input[input.len()..],
        };
    }

    while !input.is_empty() {
        match parse_record(input) {
            Ok((remaining, seq)) => {
                sequences.push(seq);
                input = remaining;
            }
            Err(nom::Err::Error(err) | nom::Err::Failure(err)) if err.code == ErrorKind::MapRes => {
                return Err(OperonError::Parse(format!(
                    "FASTA header is not valid UTF-8 at byte {}",
                    data.len() - err.input.len()
                )));
            }
            Err(e) => {
                return Err(OperonError::Parse(format!(
                    "Failed to parse FASTA: {:?}",
                    e.map(|err| err.code)
                )));
            }
        }
    }

    Ok(sequences)
}

/// Parse a FASTA file into sequences (supports .gz compression)
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> OperonResult<Vec<Sequence>> {
    let path = path.as_ref();

    if is_gzipped(path) {
        parse_fasta_gzip(path)
    } else {
        parse_fasta_uncompressed(path)
    }
}

/// Parse an uncompressed FASTA file
fn parse_fasta_uncompressed(path: &Path) -> OperonResult<Vec<Sequence>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before this function returns
    let mmap = unsafe { Mmap::map(&file)? };
    parse_fasta_from_bytes(&mmap[..])
}

/// Parse a gzipped FASTA file
fn parse_fasta_gzip(path: &Path) -> OperonResult<Vec<Sequence>> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;

    parse_fasta_from_bytes(&buffer)
}

/// Write sequences to a FASTA file (supports .gz compression).
///
/// Records are written to a temporary file next to `path` which is then
/// renamed into place.
pub fn write_fasta<P: AsRef<Path>>(
    path: P,
    sequences: &[Sequence],
    line_width: usize,
) -> OperonResult<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;

    if is_gzipped(path) {
        let encoder = GzEncoder::new(temp.as_file_mut(), Compression::default());
        let mut writer = BufWriter::new(encoder);
        write_fasta_to_writer(&mut writer, sequences, line_width)?;
        writer
            .into_inner()
            .map_err(|e| OperonError::Io(e.into_error()))?
            .finish()?;
    } else {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_fasta_to_writer(&mut writer, sequences, line_width)?;
        writer.flush()?;
    }

    temp.persist(path).map_err(|e| OperonError::Io(e.error))?;
    Ok(())
}

/// Write sequences to any writer, wrapping sequence lines at `line_width`
pub fn write_fasta_to_writer<W: Write>(
    writer: &mut W,
    sequences: &[Sequence],
    line_width: usize,
) -> OperonResult<()> {
    if line_width == 0 {
        return Err(OperonError::InvalidInput(
            "line width must be a positive integer".to_string(),
        ));
    }

    for seq in sequences {
        writer.write_all(seq.header().as_bytes())?;
        writer.write_all(b"\n")?;

        for chunk in seq.sequence.chunks(line_width) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }

    Ok(())
}
