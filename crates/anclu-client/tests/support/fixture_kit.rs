use std::fs;
use std::path::{Path, PathBuf};

use anclu_client::DatasetCache;
use anclu_client::dataset::DatasetSource;
use tempfile::{Builder, TempDir};

pub const HEADER: &str = "fec_registro,Marca,TipoProducto,vendedor,centro_costo";

pub struct SaleRow<'a> {
    pub timestamp: &'a str,
    pub brand: &'a str,
    pub product_type: &'a str,
    pub seller: &'a str,
    pub cost_center: &'a str,
}

pub fn sale<'a>(
    timestamp: &'a str,
    brand: &'a str,
    product_type: &'a str,
    seller: &'a str,
    cost_center: &'a str,
) -> SaleRow<'a> {
    SaleRow {
        timestamp,
        brand,
        product_type,
        seller,
        cost_center,
    }
}

pub fn repeat<'a>(count: usize, row: impl Fn() -> SaleRow<'a>) -> Vec<SaleRow<'a>> {
    (0..count).map(|_| row()).collect()
}

pub fn csv_content(rows: &[SaleRow<'_>]) -> String {
    let mut lines = vec![HEADER.to_string()];
    for row in rows {
        lines.push(format!(
            "{},{},{},{},{}",
            row.timestamp, row.brand, row.product_type, row.seller, row.cost_center
        ));
    }
    lines.join("\n") + "\n"
}

pub fn temp_dataset(prefix: &str, rows: &[SaleRow<'_>]) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let path = write_csv(dir.path(), "ventas_anclu.csv", &csv_content(rows))?;
    Ok((dir, path))
}

pub fn write_csv(dir: &Path, name: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

pub fn file_cache(path: &Path) -> DatasetCache {
    DatasetCache::new(DatasetSource::File(path.to_path_buf()), None)
}
