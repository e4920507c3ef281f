use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("invalid magic code: expected 'OBKP', got {0:?}")]
    InvalidMagicCode([u8; 4]),

    #[error("unsupported format version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("pack vocabulary revision {pack} is newer than runtime revision {runtime}")]
    VocabularyTooNew { pack: u16, runtime: u16 },

    #[error("file too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("invalid UTF-8 string at offset {0}")]
    InvalidUtf8(usize),

    #[error("invalid value tag {tag:#04X} at offset {offset}")]
    InvalidValueTag { tag: u8, offset: usize },

    #[error("invalid {kind} code {code}")]
    InvalidCode { kind: &'static str, code: u8 },

    #[error("invalid character scalar {0:#X}")]
    InvalidScalar(u32),

    #[error("invalid modifier state bits {0:#04X}")]
    InvalidModifierBits(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
