use crate::error::ConfigError;

const DEVICE_DAX_MARKER: &str = "/dev/dax";

/// Storage backing the remote server places its data on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Medium {
    /// DRAM; fio is told not to create any file.
    Malloc,
    /// Raw persistent-memory character device.
    DeviceDax(String),
    /// File on a DAX-mounted filesystem, one file per job.
    FsDax(String),
}

impl Medium {
    /// Picks the placement strategy from the series filetype and the
    /// configured remote memory path.
    ///
    /// # Errors
    ///
    /// Returns an error for a filetype other than `malloc` or `pmem`.
    pub fn resolve(filetype: &str, mem_path: &str) -> Result<Self, ConfigError> {
        match filetype {
            "malloc" => Ok(Self::Malloc),
            "pmem" if mem_path.contains(DEVICE_DAX_MARKER) => {
                Ok(Self::DeviceDax(mem_path.to_owned()))
            }
            "pmem" => Ok(Self::FsDax(mem_path.to_owned())),
            _ => Err(ConfigError::UnknownFiletype {
                value: filetype.to_owned(),
            }),
        }
    }

    /// fio arguments selecting the placement.
    #[must_use]
    pub fn server_args(&self) -> Vec<String> {
        match self {
            Self::Malloc => vec![
                "--filename=malloc".to_owned(),
                "--create_on_open=1".to_owned(),
            ],
            Self::DeviceDax(path) => vec![format!("--filename={}", path)],
            // `$jobnum` is expanded by fio, never by a shell.
            Self::FsDax(path) => vec![format!("--filename_format={}.$jobnum", path)],
        }
    }
}
