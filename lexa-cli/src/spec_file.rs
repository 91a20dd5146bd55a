//! Token-spec file format: one `name = pattern` assignment per line, blank lines and
//! `#`-comments ignored. Parsed in the two-phase style the core crate's own text
//! formats use: a nom grammar into borrowed spans first, then a `TryFrom` pass that
//! validates and owns the result.

use nom::branch::alt;
use nom::bytes::complete::is_not;
use nom::character::complete::{char, line_ending, not_line_ending, space0};
use nom::combinator::{all_consuming, eof, map, opt, value};
use nom::multi::many0;
use nom::sequence::{pair, terminated};
use nom::{Finish, IResult};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpecFile<'a> {
    pub entries: Vec<(&'a str, &'a str)>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecFileError {
    #[error("line {0}: pattern is empty")]
    EmptyPattern(usize),
    #[error("duplicate token name {0:?}")]
    DuplicateName(String),
}

/// A validated, owned token-spec file: `(name, pattern)` pairs in declaration order,
/// ready to feed into [`lexa::Generator::add_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    pub entries: Vec<(String, String)>,
}

impl<'a> TryFrom<ParsedSpecFile<'a>> for SpecFile {
    type Error = SpecFileError;

    fn try_from(parsed: ParsedSpecFile<'a>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for (line, (name, pattern)) in parsed.entries.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(SpecFileError::EmptyPattern(line + 1));
            }
            if !seen.insert(*name) {
                return Err(SpecFileError::DuplicateName((*name).to_string()));
            }
        }
        Ok(SpecFile {
            entries: parsed
                .entries
                .into_iter()
                .map(|(n, p)| (n.trim().to_string(), p.trim().to_string()))
                .collect(),
        })
    }
}

#[derive(Error, Debug)]
pub enum SpecFileLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse spec file: {0}")]
    Parse(String),
    #[error(transparent)]
    Invalid(#[from] SpecFileError),
}

fn blank_line(input: &str) -> IResult<&str, ()> {
    value((), pair(space0, opt(pair(char('#'), not_line_ending))))(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    is_not(" \t=\r\n")(input)
}

fn spec_entry(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = space0(input)?;
    let (input, name) = name(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = space0(input)?;
    let (input, pattern) = not_line_ending(input)?;
    Ok((input, (name, pattern.trim_end())))
}

fn spec_line(input: &str) -> IResult<&str, Option<(&str, &str)>> {
    alt((map(spec_entry, Some), map(blank_line, |_| None)))(input)
}

fn spec_file(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    let (input, lines) = many0(terminated(spec_line, alt((line_ending, eof))))(input)?;
    Ok((input, lines.into_iter().flatten().collect()))
}

/// Parses the text of a token-spec file into borrowed `(name, pattern)` spans.
pub fn parse(input: &str) -> Result<ParsedSpecFile<'_>, nom::error::Error<&str>> {
    let (_, entries) = all_consuming(spec_file)(input).finish()?;
    Ok(ParsedSpecFile { entries })
}

/// Reads and parses a token-spec file from disk.
pub fn load(path: &Path) -> Result<SpecFile, SpecFileLoadError> {
    let text = fs::read_to_string(path).map_err(|source| SpecFileLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse(&text).map_err(|e| SpecFileLoadError::Parse(e.to_string()))?;
    Ok(SpecFile::try_from(parsed)?)
}
