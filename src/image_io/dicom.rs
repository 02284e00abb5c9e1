//! DICOM decoding: native grayscale pixel data windowed down to 8 bits, plus
//! a short patient/study metadata block.

use super::{ImageError, SourceImage};
use chrono::NaiveDate;
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::DefaultDicomObject;
use image::{DynamicImage, GrayImage};
use std::path::Path;

const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";
const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";

/// Metadata fields shown next to the image, in display order.
const METADATA_FIELDS: [(&str, Tag); 9] = [
    ("Patient ID", tags::PATIENT_ID),
    ("Name", tags::PATIENT_NAME),
    ("Birth date", tags::PATIENT_BIRTH_DATE),
    ("Sex", tags::PATIENT_SEX),
    ("Weight", tags::PATIENT_WEIGHT),
    ("Study date", tags::STUDY_DATE),
    ("Series date", tags::SERIES_DATE),
    ("Patient age", tags::PATIENT_AGE),
    ("Body part", tags::BODY_PART_EXAMINED),
];

fn decode_error(err: impl std::fmt::Display) -> ImageError {
    ImageError::Decode(err.to_string())
}

fn read_u16(obj: &DefaultDicomObject, tag: Tag) -> Result<u16, ImageError> {
    obj.element(tag)
        .map_err(decode_error)?
        .to_int::<u16>()
        .map_err(decode_error)
}

fn read_text(obj: &DefaultDicomObject, tag: Tag) -> String {
    obj.element(tag)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim().trim_end_matches('\0').to_string())
        .unwrap_or_default()
}

/// Loads the first frame of a DICOM file.
pub fn load_dicom(path: &Path) -> Result<SourceImage, ImageError> {
    let obj = dicom_object::open_file(path).map_err(decode_error)?;

    let transfer_syntax = obj.meta().transfer_syntax().trim_end_matches('\0').to_string();
    if ![IMPLICIT_VR_LITTLE_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN].contains(&transfer_syntax.as_str()) {
        return Err(ImageError::Decode(format!(
            "unsupported transfer syntax {transfer_syntax} (only uncompressed little endian)"
        )));
    }

    let rows = read_u16(&obj, tags::ROWS)?;
    let columns = read_u16(&obj, tags::COLUMNS)?;
    let bits_allocated = read_u16(&obj, tags::BITS_ALLOCATED)?;
    let samples_per_pixel = read_u16(&obj, tags::SAMPLES_PER_PIXEL).unwrap_or(1);
    let signed = read_u16(&obj, tags::PIXEL_REPRESENTATION).unwrap_or(0) == 1;
    if samples_per_pixel != 1 {
        return Err(ImageError::Decode(format!(
            "{samples_per_pixel} samples per pixel, only grayscale is supported"
        )));
    }

    let count = usize::from(rows) * usize::from(columns);
    let element = obj.element(tags::PIXEL_DATA).map_err(decode_error)?;
    let bytes = element.to_bytes().map_err(decode_error)?;
    let samples = decode_samples(&bytes, bits_allocated, signed, count)?;
    let mut gray = window_to_gray(&samples);
    if read_text(&obj, tags::PHOTOMETRIC_INTERPRETATION) == "MONOCHROME1" {
        gray.iter_mut().for_each(|value| *value = 255 - *value);
    }

    let raster = GrayImage::from_raw(u32::from(columns), u32::from(rows), gray)
        .ok_or_else(|| ImageError::Decode("pixel data does not match image size".into()))?;
    let metadata = metadata_block(
        &METADATA_FIELDS
            .iter()
            .map(|(label, tag)| (*label, format_field(*tag, &read_text(&obj, *tag))))
            .collect::<Vec<_>>(),
    );

    log::info!(
        "Decoded DICOM {}x{} ({} bits, {})",
        columns,
        rows,
        bits_allocated,
        if signed { "signed" } else { "unsigned" }
    );
    Ok(SourceImage {
        raster: DynamicImage::ImageLuma8(raster).to_rgba8(),
        metadata: Some(metadata),
    })
}

/// Splits raw little-endian pixel data into `count` samples.
pub fn decode_samples(
    bytes: &[u8],
    bits_allocated: u16,
    signed: bool,
    count: usize,
) -> Result<Vec<i32>, ImageError> {
    let width = match bits_allocated {
        8 => 1,
        16 => 2,
        other => {
            return Err(ImageError::Decode(format!(
                "{other} bits allocated, expected 8 or 16"
            )));
        }
    };
    if bytes.len() < count * width {
        return Err(ImageError::Decode(format!(
            "pixel data holds {} bytes, {} expected",
            bytes.len(),
            count * width
        )));
    }
    let samples = bytes[..count * width]
        .chunks_exact(width)
        .map(|chunk| match (width, signed) {
            (1, false) => i32::from(chunk[0]),
            (1, true) => i32::from(chunk[0] as i8),
            (_, false) => i32::from(u16::from_le_bytes([chunk[0], chunk[1]])),
            (_, true) => i32::from(i16::from_le_bytes([chunk[0], chunk[1]])),
        })
        .collect();
    Ok(samples)
}

/// Maps samples onto 0..=255: `floor((v - min) / ((max - min + 1) / 256))`.
pub fn window_to_gray(samples: &[i32]) -> Vec<u8> {
    let (Some(min), Some(max)) = (samples.iter().min(), samples.iter().max()) else {
        return Vec::new();
    };
    let step = (f64::from(*max) - f64::from(*min) + 1.0) / 256.0;
    samples
        .iter()
        .map(|value| ((f64::from(*value) - f64::from(*min)) / step).floor().clamp(0.0, 255.0) as u8)
        .collect()
}

fn format_field(tag: Tag, raw: &str) -> String {
    match tag {
        tags::PATIENT_BIRTH_DATE | tags::STUDY_DATE | tags::SERIES_DATE => format_date(raw),
        tags::PATIENT_AGE => format_age(raw),
        tags::PATIENT_NAME => raw.replace('^', " ").trim().to_string(),
        _ => raw.to_string(),
    }
}

/// `YYYYMMDD` → `YYYY-MM-DD`; anything else becomes empty.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// `nnnU` age strings (`045Y`, `003M`, `002W`, `010D`) → `45 years` etc.
///
/// Malformed ages become empty.
pub fn format_age(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.is_char_boundary(3) {
        return String::new();
    }
    let (digits, unit) = raw.split_at(3);
    let Ok(value) = digits.parse::<u32>() else {
        return String::new();
    };
    let unit = match unit {
        "Y" => "year",
        "M" => "month",
        "W" => "week",
        "D" => "day",
        _ => return String::new(),
    };
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// `Key: value` paragraphs separated by `---` rules.
pub fn metadata_block(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {value}\n\n"))
        .collect::<Vec<_>>()
        .join("---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_io::{FileImageSource, ImageSource};
    use dicom_core::{DataElement, PrimitiveValue, VR, dicom_value};
    use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
    use image::Rgba;
    use std::path::PathBuf;

    const JPEG_BASELINE: &str = "1.2.840.10008.1.2.4.50";

    fn text(tag: Tag, vr: VR, value: &str) -> DataElement<InMemDicomObject> {
        DataElement::new(tag, vr, PrimitiveValue::from(value))
    }

    fn short(tag: Tag, value: u16) -> DataElement<InMemDicomObject> {
        DataElement::new(tag, VR::US, dicom_value!(U16, [value]))
    }

    /// 2x2 MONOCHROME1 scan with 16-bit samples 0, 255, 511 and 1023.
    fn write_scan(dir: &Path, transfer_syntax: &str) -> PathBuf {
        let pixels: Vec<u8> = [0_u16, 255, 511, 1023]
            .iter()
            .flat_map(|sample| sample.to_le_bytes())
            .collect();
        let obj = InMemDicomObject::from_element_iter([
            text(tags::PATIENT_ID, VR::LO, "P-7"),
            text(tags::PATIENT_NAME, VR::PN, "Doe^Jane"),
            text(tags::PATIENT_BIRTH_DATE, VR::DA, "19840229"),
            text(tags::PATIENT_SEX, VR::CS, "F"),
            text(tags::STUDY_DATE, VR::DA, "20240105"),
            text(tags::PATIENT_AGE, VR::AS, "040Y"),
            short(tags::SAMPLES_PER_PIXEL, 1),
            text(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME1"),
            short(tags::ROWS, 2),
            short(tags::COLUMNS, 2),
            short(tags::BITS_ALLOCATED, 16),
            short(tags::BITS_STORED, 16),
            short(tags::HIGH_BIT, 15),
            short(tags::PIXEL_REPRESENTATION, 0),
            DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(pixels)),
        ]);
        let file = obj
            .with_meta(FileMetaTableBuilder::new().transfer_syntax(transfer_syntax))
            .unwrap();
        let path = dir.join("scan.dcm");
        file.write_to_file(&path).unwrap();
        path
    }

    #[test]
    fn loads_an_uncompressed_scan_with_its_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scan(dir.path(), EXPLICIT_VR_LITTLE_ENDIAN);

        let source = FileImageSource.load(&path).unwrap();
        assert_eq!(source.dimensions(), (2, 2));
        // Windowed to 0, 63, 127, 255, then inverted.
        assert_eq!(source.raster.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(source.raster.get_pixel(1, 0), &Rgba([192, 192, 192, 255]));
        assert_eq!(source.raster.get_pixel(0, 1), &Rgba([128, 128, 128, 255]));
        assert_eq!(source.raster.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));

        let expected = [
            "Patient ID: P-7",
            "Name: Doe Jane",
            "Birth date: 1984-02-29",
            "Sex: F",
            "Weight: ",
            "Study date: 2024-01-05",
            "Series date: ",
            "Patient age: 40 years",
            "Body part: ",
        ]
        .map(|line| format!("{line}\n\n"))
        .join("---\n\n");
        assert_eq!(source.metadata.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn compressed_transfer_syntax_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scan(dir.path(), JPEG_BASELINE);

        let err = FileImageSource.load(&path).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn windowing_spreads_the_full_range() {
        let gray = window_to_gray(&[100, 612, 1123]);
        assert_eq!(gray, vec![0, 128, 255]);
    }

    #[test]
    fn windowing_a_flat_image_is_black() {
        assert_eq!(window_to_gray(&[42, 42, 42]), vec![0, 0, 0]);
        assert!(window_to_gray(&[]).is_empty());
    }

    #[test]
    fn samples_respect_width_and_sign() {
        let bytes = [0x01, 0x00, 0xff, 0xff];
        assert_eq!(decode_samples(&bytes, 16, false, 2).unwrap(), vec![1, 65535]);
        assert_eq!(decode_samples(&bytes, 16, true, 2).unwrap(), vec![1, -1]);
        assert_eq!(decode_samples(&bytes, 8, true, 4).unwrap(), vec![1, 0, -1, -1]);
        assert!(decode_samples(&bytes, 16, false, 3).is_err());
        assert!(decode_samples(&bytes, 12, false, 1).is_err());
    }

    #[test]
    fn dates_and_ages() {
        assert_eq!(format_date("19840229"), "1984-02-29");
        assert_eq!(format_date("1984-02"), "");
        assert_eq!(format_age("045Y"), "45 years");
        assert_eq!(format_age("001M"), "1 month");
        assert_eq!(format_age("010D"), "10 days");
        assert_eq!(format_age("45"), "");
        assert_eq!(format_age("0X5Y"), "");
    }

    #[test]
    fn metadata_paragraphs() {
        let block = metadata_block(&[("Sex", "F".into()), ("Weight", String::new())]);
        assert_eq!(block, "Sex: F\n\n---\n\nWeight: \n\n");
    }
}
