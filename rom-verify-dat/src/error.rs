/// Errors that can occur while loading a reference catalog.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document is readable but does not describe a usable catalog.
    #[error("Invalid DAT file: {0}")]
    InvalidDat(String),
}

impl DatError {
    pub fn invalid_dat(msg: impl Into<String>) -> Self {
        Self::InvalidDat(msg.into())
    }
}
