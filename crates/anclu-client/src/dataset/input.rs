use std::fs;
use std::io::{ErrorKind, IsTerminal, Read};
use std::path::PathBuf;

use crate::{ClientError, ClientResult};

/// Where the sales dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Stdin,
    /// Already-read content, labelled for messages and logs.
    Text { label: String, content: String },
}

impl DatasetSource {
    /// `-` selects stdin; anything else is a file path.
    pub fn from_arg(value: &str) -> Self {
        if value == "-" {
            return Self::Stdin;
        }
        Self::File(PathBuf::from(value))
    }

    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
            Self::Text { label, .. } => label.clone(),
        }
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }
}

pub(crate) fn read_source(source: &DatasetSource) -> ClientResult<String> {
    match source {
        DatasetSource::File(path) => {
            let bytes = fs::read(path).map_err(|error| {
                if error.kind() == ErrorKind::NotFound {
                    return ClientError::dataset_not_found(path);
                }
                ClientError::dataset_unreadable(&path.display().to_string(), &error.to_string())
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        DatasetSource::Stdin => read_stdin(),
        DatasetSource::Text { content, .. } => Ok(content.clone()),
    }
}

fn read_stdin() -> ClientResult<String> {
    if std::io::stdin().is_terminal() {
        return Err(ClientError::invalid_argument_with_recovery(
            "Dataset source `-` means stdin, but stdin is a terminal.",
            vec![
                "Pipe the CSV in: `cat ventas.csv | anclu report --data -`.".to_string(),
                "Or pass a file path with `--data <path>`.".to_string(),
            ],
        ));
    }

    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|error| ClientError::dataset_unreadable("stdin", &error.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
