mod pdf;

pub use pdf::PdfExtractParser;
