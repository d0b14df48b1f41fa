use crate::error::{MibError, Result};

/// Size of the header block of a single-sensor acquisition.
pub const SINGLE_HEADER_SIZE: usize = 384;

/// Size of the header block of a four-sensor (quad) acquisition.
pub const QUAD_HEADER_SIZE: usize = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    U8,
    U16Be,
    U32Be,
}

impl PixelType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U08" => Some(Self::U8),
            "U16" => Some(Self::U16Be),
            "U32" => Some(Self::U32Be),
            _ => None,
        }
    }

    #[must_use]
    pub const fn byte_width(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16Be => 2,
            Self::U32Be => 4,
        }
    }

    /// Counter depth the detector was configured with for this encoding.
    #[must_use]
    pub const fn dyn_range(&self) -> &'static str {
        match self {
            Self::U8 => "1 or 6-bit",
            Self::U16Be => "12-bit",
            Self::U32Be => "24-bit",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16Be => ">u2",
            Self::U32Be => ">u4",
        }
    }
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Unprocessed counter data (`R64`); cannot be mapped.
    Raw,
    Processed(PixelType),
}

impl Encoding {
    pub fn from_code(code: &str) -> Result<Self> {
        if code == "R64" {
            return Ok(Self::Raw);
        }
        PixelType::from_code(code)
            .map(Self::Processed)
            .ok_or_else(|| MibError::format(format!("unknown pixel encoding '{code}'")))
    }

    #[inline]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw)
    }

    #[inline]
    pub const fn pixel_type(&self) -> Option<PixelType> {
        match self {
            Self::Raw => None,
            Self::Processed(p) => Some(*p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetectorGeometry {
    #[default]
    Single,
    Quad2x2,
    Nx1,
}

impl DetectorGeometry {
    pub fn from_field(field: &str) -> Self {
        let field = field.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        if field.ends_with("2x2") {
            Self::Quad2x2
        } else if field.ends_with("Nx1") {
            Self::Nx1
        } else {
            Self::Single
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Single => "1x1",
            Self::Quad2x2 => "2x2",
            Self::Nx1 => "Nx1",
        }
    }
}

impl std::fmt::Display for DetectorGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Header block size announced by field 2 of every frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Single,
    Quad,
}

impl HeaderKind {
    pub fn from_sentinel(field: &str) -> Result<Self> {
        match field.trim() {
            "00384" => Ok(Self::Single),
            "00768" => Ok(Self::Quad),
            other => Err(MibError::format(format!(
                "unknown header size sentinel '{other}'"
            ))),
        }
    }

    #[must_use]
    pub const fn byte_size(&self) -> usize {
        match self {
            Self::Single => SINGLE_HEADER_SIZE,
            Self::Quad => QUAD_HEADER_SIZE,
        }
    }
}
