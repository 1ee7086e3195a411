use std::io::{BufRead, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// A parsed reference DAT (Logiqx XML or ClrMamePro text).
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    pub name: String,
    pub description: String,
    pub version: String,
    pub games: Vec<DatGame>,
}

/// A single game record.
#[derive(Debug, Clone)]
pub struct DatGame {
    pub name: String,
    pub roms: Vec<DatRom>,
}

/// A single ROM record within a game.
#[derive(Debug, Clone, Default)]
pub struct DatRom {
    pub name: String,
    pub size: Option<u64>,
    /// CRC32 checksum (lowercase hex)
    pub crc: Option<String>,
}

impl DatGame {
    /// The checksum that identifies this game in a catalog index: the CRC of
    /// its first ROM record.
    pub fn checksum(&self) -> Option<&str> {
        self.roms.first().and_then(|rom| rom.crc.as_deref())
    }
}

/// Parse a DAT document, auto-detecting format (XML or ClrMamePro).
pub fn parse_dat<R: BufRead>(mut reader: R) -> Result<DatFile, DatError> {
    skip_bom(&mut reader)?;

    // Peek at the first non-whitespace byte to detect the format
    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Err(DatError::invalid_dat("Empty DAT file"));
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            break;
        }
    }

    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    let buffered = std::io::BufReader::new(chain);

    if buf[0] == b'<' {
        parse_xml(buffered)
    } else {
        parse_clrmamepro(buffered)
    }
}

/// Drop a leading UTF-8 byte order mark, if any.
fn skip_bom<R: BufRead>(reader: &mut R) -> Result<(), DatError> {
    const BOM: &[u8] = b"\xEF\xBB\xBF";
    if reader.fill_buf()?.starts_with(BOM) {
        reader.consume(BOM.len());
    }
    Ok(())
}

/// Parse a DAT document from a file path.
pub fn parse_dat_file(path: &Path) -> Result<DatFile, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

/// Returns true for a fixed-width (8 digit) hexadecimal CRC32 string.
pub fn is_valid_crc(crc: &str) -> bool {
    crc.len() == 8 && crc.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Check that a completed game record can be indexed by checksum.
fn validate_game(game: &DatGame) -> Result<(), DatError> {
    if game.name.is_empty() {
        return Err(DatError::invalid_dat("game record without a name"));
    }
    let Some(rom) = game.roms.first() else {
        return Err(DatError::invalid_dat(format!(
            "game \"{}\" has no rom record",
            game.name
        )));
    };
    match rom.crc.as_deref() {
        None => Err(DatError::invalid_dat(format!(
            "game \"{}\": rom has no crc attribute",
            game.name
        ))),
        Some(crc) if !is_valid_crc(crc) => Err(DatError::invalid_dat(format!(
            "game \"{}\": invalid crc \"{crc}\"",
            game.name
        ))),
        Some(_) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Logiqx XML parser
// ---------------------------------------------------------------------------

fn parse_xml<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile::default();

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<DatGame> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = element_name(e);
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => current_game = Some(start_xml_game(e)?),
                    "rom" => {
                        if let Some(ref mut game) = current_game {
                            game.roms.push(parse_xml_rom_attributes(e)?);
                        }
                    }
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                let tag_name = element_name(e);
                match tag_name.as_str() {
                    // A self-closing game cannot carry a rom, so validation rejects it
                    "game" | "machine" => {
                        let game = start_xml_game(e)?;
                        validate_game(&game)?;
                        dat.games.push(game);
                    }
                    "rom" => {
                        if let Some(ref mut game) = current_game {
                            game.roms.push(parse_xml_rom_attributes(e)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if in_header {
                    let text = e.unescape()?.into_owned();
                    match current_tag.as_str() {
                        "name" => dat.name = text,
                        "description" => dat.description = text,
                        "version" => dat.version = text,
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" => {
                        if let Some(game) = current_game.take() {
                            validate_game(&game)?;
                            dat.games.push(game);
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(game) = current_game {
        return Err(DatError::invalid_dat(format!(
            "unterminated game record \"{}\"",
            game.name
        )));
    }

    if dat.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in XML DAT file",
        ));
    }

    Ok(dat)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn start_xml_game(e: &BytesStart<'_>) -> Result<DatGame, DatError> {
    let mut name = None;
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            name = Some(attr.unescape_value()?.into_owned());
        }
    }
    let name = name.ok_or_else(|| DatError::invalid_dat("game record without a name attribute"))?;
    Ok(DatGame {
        name,
        roms: Vec::new(),
    })
}

fn parse_xml_rom_attributes(e: &BytesStart<'_>) -> Result<DatRom, DatError> {
    let mut rom = DatRom::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"name" => rom.name = value,
            b"size" => {
                rom.size = Some(
                    value
                        .parse()
                        .map_err(|_| DatError::invalid_dat(format!("Invalid ROM size: {value}")))?,
                );
            }
            b"crc" => rom.crc = Some(value.to_lowercase()),
            _ => {}
        }
    }

    Ok(rom)
}

// ---------------------------------------------------------------------------
// ClrMamePro DAT parser
// ---------------------------------------------------------------------------

/// Parse a ClrMamePro format DAT file.
///
/// Format:
/// ```text
/// clrmamepro (
///     name "System Name"
///     version 20240101-000000
/// )
///
/// game (
///     name "Game Name (Region)"
///     rom ( name "Game Name (Region).ext" size 12345 crc AABBCCDD )
/// )
/// ```
fn parse_clrmamepro<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut dat = DatFile::default();

    let mut in_block: Option<String> = None; // "clrmamepro" or "game"
    let mut current_game: Option<DatGame> = None;

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let Some(block_type) = in_block.as_deref() else {
            if let Some(block_type) = detect_block_start(trimmed) {
                if block_type == "game" {
                    current_game = Some(DatGame {
                        name: String::new(),
                        roms: Vec::new(),
                    });
                }
                in_block = Some(block_type);
            }
            continue;
        };

        if trimmed == ")" {
            if block_type == "game" {
                if let Some(game) = current_game.take() {
                    validate_game(&game)?;
                    dat.games.push(game);
                }
            }
            in_block = None;
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };
        match block_type {
            "clrmamepro" => match key.as_str() {
                "name" => dat.name = value,
                "description" => dat.description = value,
                "version" => dat.version = value,
                _ => {}
            },
            "game" => {
                if let Some(ref mut game) = current_game {
                    match key.as_str() {
                        "name" => game.name = value,
                        "rom" => game.roms.push(parse_clr_rom_inline(&value)?),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(game) = current_game {
        return Err(DatError::invalid_dat(format!(
            "unterminated game block \"{}\"",
            game.name
        )));
    }

    if dat.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in ClrMamePro DAT file",
        ));
    }

    Ok(dat)
}

/// Detect a block start like `clrmamepro (` or `game (`.
fn detect_block_start(line: &str) -> Option<String> {
    let stripped = line.trim_end().strip_suffix('(')?;
    let block_type = stripped.trim();
    if !block_type.is_empty() && block_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some(block_type.to_lowercase());
    }
    None
}

/// Parse a key-value line like `name "Some Value"` or `version 20240101`.
/// For `rom ( ... )` lines, the value is the content inside the outer parens.
fn parse_kv(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("rom") {
        let rest = rest.trim();
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            return Some(("rom".to_string(), inner.trim().to_string()));
        }
    }

    let mut parts = trimmed.splitn(2, |c: char| c.is_ascii_whitespace());
    let key = parts.next()?.trim().to_string();
    let raw_value = parts.next()?.trim();

    let value = raw_value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw_value)
        .to_string();

    Some((key, value))
}

/// Parse an inline ROM entry like:
/// `name "Game (Region).ext" size 12345 crc AABBCCDD`
fn parse_clr_rom_inline(inner: &str) -> Result<DatRom, DatError> {
    let tokens = tokenize_rom_line(inner);
    let mut rom = DatRom::default();

    for pair in tokens.chunks(2) {
        let [key, value] = pair else {
            break;
        };
        match key.as_str() {
            "name" => rom.name = value.clone(),
            "size" => {
                rom.size = Some(
                    value
                        .parse()
                        .map_err(|_| DatError::invalid_dat(format!("Invalid ROM size: {value}")))?,
                );
            }
            "crc" => rom.crc = Some(value.to_lowercase()),
            _ => {}
        }
    }

    Ok(rom)
}

/// Tokenize a ROM line, respecting quoted strings.
/// `name "Game (Region).ext" size 12345 crc AB` → ["name", "Game (Region).ext", "size", "12345", "crc", "AB"]
fn tokenize_rom_line(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }

        if chars.peek().is_none() {
            break;
        }

        let mut token = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
