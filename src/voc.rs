//! PASCAL VOC annotation records and XML serialization
//!
//! One record per image. The writer emits indented, UTF-8 XML without an
//! XML declaration; the reader accepts the same structure back.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub const VOC_FOLDER: &str = "VOC2007";
pub const VOC_POSE: &str = "Unspecified";
pub const VOC_DEPTH: u32 = 3;

/// Corner-pair bounding box in absolute pixels, xmin <= xmax and ymin <= ymax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocObject {
    pub name: String,
    #[serde(default)]
    pub pose: Option<String>,
    #[serde(default)]
    pub truncated: Option<u32>,
    #[serde(default)]
    pub difficult: Option<u32>,
    pub bndbox: BndBox,
}

impl VocObject {
    pub fn new(name: impl Into<String>, bndbox: BndBox) -> Self {
        Self {
            name: name.into(),
            pose: Some(VOC_POSE.to_string()),
            truncated: Some(0),
            difficult: Some(0),
            bndbox,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    VOC_DEPTH
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocAnnotation {
    #[serde(default)]
    pub folder: Option<String>,
    pub filename: String,
    pub size: Size,
    #[serde(default)]
    pub segmented: Option<u32>,
    #[serde(default, rename = "object")]
    pub objects: Vec<VocObject>,
}

impl VocAnnotation {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            folder: Some(VOC_FOLDER.to_string()),
            filename: filename.into(),
            size: Size {
                width,
                height,
                depth: VOC_DEPTH,
            },
            segmented: Some(0),
            objects: Vec::new(),
        }
    }

    /// Serialize as indented XML. No XML declaration is written.
    pub fn to_xml_string(&self) -> Result<String, Box<dyn Error>> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Start(BytesStart::new("annotation")))?;

        write_element(
            &mut writer,
            "folder",
            self.folder.as_deref().unwrap_or(VOC_FOLDER),
        )?;
        write_element(&mut writer, "filename", &self.filename)?;

        writer.write_event(Event::Start(BytesStart::new("size")))?;
        write_element(&mut writer, "width", &self.size.width.to_string())?;
        write_element(&mut writer, "height", &self.size.height.to_string())?;
        write_element(&mut writer, "depth", &self.size.depth.to_string())?;
        writer.write_event(Event::End(BytesEnd::new("size")))?;

        write_element(
            &mut writer,
            "segmented",
            &self.segmented.unwrap_or(0).to_string(),
        )?;

        for object in &self.objects {
            writer.write_event(Event::Start(BytesStart::new("object")))?;
            write_element(&mut writer, "name", &object.name)?;
            write_element(&mut writer, "pose", object.pose.as_deref().unwrap_or(VOC_POSE))?;
            write_element(
                &mut writer,
                "truncated",
                &object.truncated.unwrap_or(0).to_string(),
            )?;
            write_element(
                &mut writer,
                "difficult",
                &object.difficult.unwrap_or(0).to_string(),
            )?;

            writer.write_event(Event::Start(BytesStart::new("bndbox")))?;
            write_element(&mut writer, "xmin", &object.bndbox.xmin.to_string())?;
            write_element(&mut writer, "ymin", &object.bndbox.ymin.to_string())?;
            write_element(&mut writer, "xmax", &object.bndbox.xmax.to_string())?;
            write_element(&mut writer, "ymax", &object.bndbox.ymax.to_string())?;
            writer.write_event(Event::End(BytesEnd::new("bndbox")))?;

            writer.write_event(Event::End(BytesEnd::new("object")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("annotation")))?;

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }
}

fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Parse a VOC XML annotation file. Structural failures are fatal for the
/// caller since everything downstream assumes a well-formed record.
pub fn read_voc_xml(path: &Path) -> Result<VocAnnotation, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read annotation file {}: {}", path.display(), e))?;
    let annotation: VocAnnotation = quick_xml::de::from_str(&content)
        .map_err(|e| format!("failed to parse annotation file {}: {}", path.display(), e))?;
    Ok(annotation)
}
