//! Page text: banners, data preview, prediction and the model explanation.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - the CLI and TUI show the same wording

use crate::app::pipeline::PageView;
use crate::domain::{COL_CONSUMPTION, COL_OCCUPANTS, COL_WASTE, DatasetSource, FitResult, WasteRow};
use crate::error::{AppError, ErrorKind};

pub const PAGE_TITLE: &str = "Prediksi Jumlah Sampah Rumah Tangga";
pub const PAGE_SUBTITLE: &str =
    "Model prediksi berdasarkan jumlah penghuni dan konsumsi makanan per orang per hari.";

/// Fixed explanation of the model shown after a prediction.
pub const MODEL_EXPLANATION: &str = "\
Apa itu Model Prediksi yang Digunakan?

Model prediksi yang digunakan di aplikasi ini adalah Regresi Linear.

Regresi linear memodelkan hubungan linier antara:
- Input (fitur): Jumlah penghuni & konsumsi makanan
- Output (target): Sampah harian dalam kg

Formula umumnya:

    Sampah = b0 + b1 x Jumlah Penghuni + b2 x Konsumsi

Model ini dilatih dari dataset (bawaan atau hasil upload), kemudian digunakan
untuk menghitung prediksi berdasarkan input kamu.

Kelebihan:
- Cepat, sederhana, dan bisa dijelaskan secara logis.
- Cocok untuk data dengan hubungan linier.

Keterbatasan:
- Kurang cocok untuk hubungan kompleks.
- Tidak memperhitungkan variabel lain (misalnya: musim, jenis makanan, daur ulang).

Jika ingin model lebih akurat, kamu bisa menyediakan dataset nyata atau
menambahkan lebih banyak variabel input.
";

/// Status line kind; front-ends pick the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub text: String,
}

/// Banner describing where the active dataset came from.
pub fn source_banner(source: &DatasetSource) -> Banner {
    match source {
        DatasetSource::Uploaded { .. } => Banner {
            level: BannerLevel::Success,
            text: "Dataset berhasil dimuat.".to_string(),
        },
        DatasetSource::Synthetic { .. } => Banner {
            level: BannerLevel::Info,
            text: "Menggunakan dataset bawaan (simulasi)".to_string(),
        },
    }
}

/// Banner for a run that halted.
pub fn error_banner(err: &AppError) -> Banner {
    let text = match err.kind() {
        ErrorKind::FileParse | ErrorKind::MissingColumn => format!("Gagal membaca file: {err}"),
        _ => format!("Terjadi kesalahan: {err}"),
    };
    Banner {
        level: BannerLevel::Error,
        text,
    }
}

/// The prediction sentence, two decimals.
pub fn prediction_text(waste: f64) -> String {
    format!("Perkiraan jumlah sampah harian: {waste:.2} kg")
}

/// One-line description of the fitted coefficients and quality.
pub fn model_summary(fit: &FitResult) -> String {
    let m = &fit.model;
    let q = &fit.quality;
    let r2 = q
        .r_squared
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Sampah = {:.4} + {:.4} x Penghuni + {:.4} x Konsumsi | n={} RMSE={:.4} R2={r2}",
        m.intercept, m.occupants_coef, m.consumption_coef, q.n, q.rmse
    )
}

/// Render the preview rows as a fixed-width table.
///
/// Row labels are 0-based positions in the dataset.
pub fn format_preview_table(rows: &[WasteRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>16} {:>22} {:>12}\n",
        "", COL_OCCUPANTS, COL_CONSUMPTION, COL_WASTE
    ));
    out.push_str(&format!("{:-<4} {:-<16} {:-<22} {:-<12}\n", "", "", "", ""));
    for (i, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>16} {:>22.4} {:>12.4}\n",
            i, r.occupants, r.consumption, r.waste
        ));
    }
    out
}

/// Format everything that precedes the chart.
pub fn format_page(view: &PageView) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {PAGE_TITLE} ===\n"));
    out.push_str(PAGE_SUBTITLE);
    out.push_str("\n\n");

    out.push_str(&format_banner(&source_banner(&view.dataset.source)));
    out.push('\n');

    out.push_str(&format!(
        "Data Latih ({} baris, menampilkan {}):\n",
        view.dataset.len(),
        view.preview().len()
    ));
    out.push_str(&format_preview_table(view.preview()));
    out.push('\n');

    out.push_str(&model_summary(&view.fit));
    out.push('\n');

    if let Some(p) = &view.prediction {
        out.push_str(&format!(
            "\nInput: penghuni={} | konsumsi={} kg/orang/hari\n",
            p.input.occupants, p.input.consumption
        ));
        out.push_str(&format_banner(&Banner {
            level: BannerLevel::Success,
            text: prediction_text(p.waste),
        }));
    }

    out
}

pub fn format_banner(banner: &Banner) -> String {
    let tag = match banner.level {
        BannerLevel::Success => "[OK]",
        BannerLevel::Info => "[INFO]",
        BannerLevel::Error => "[ERROR]",
    };
    format!("{tag} {}\n", banner.text)
}
