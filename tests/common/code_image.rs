use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};
use std::error::Error;

/// An image XObject pulled out of a PDF, decoded to 8-bit samples.
pub struct EmbeddedImage {
    pub width: usize,
    pub height: usize,
    /// One grey level per pixel, row-major.
    pub gray: Vec<u8>,
    /// Soft mask samples, if the image has one.
    pub alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    /// Samples the centre of every module of a borderless `modules` x `modules`
    /// code. Dark means opaque and darker than mid-grey.
    pub fn modules(&self, modules: usize) -> Vec<bool> {
        let module_w = self.width as f32 / modules as f32;
        let module_h = self.height as f32 / modules as f32;
        let mut out = Vec::with_capacity(modules * modules);
        for row in 0..modules {
            for col in 0..modules {
                let x = ((col as f32 + 0.5) * module_w) as usize;
                let y = ((row as f32 + 0.5) * module_h) as usize;
                let i = y * self.width + x;
                let opaque = self.alpha.as_ref().is_none_or(|a| a[i] > 127);
                out.push(opaque && self.gray[i] < 128);
            }
        }
        out
    }
}

/// Every image XObject drawable from a page, including those nested in Form
/// XObjects, in resource order.
pub fn embedded_images(pdf: &[u8], page: u32) -> Result<Vec<EmbeddedImage>, Box<dyn Error>> {
    let doc = LopdfDocument::load_mem(pdf)?;
    let page_id = *doc.get_pages().get(&page).ok_or("page out of range")?;
    let resources = match doc.get_dictionary(page_id)?.get(b"Resources") {
        Ok(obj) => resolve(&doc, obj)?.as_dict()?.clone(),
        Err(_) => Dictionary::new(),
    };
    let mut images = Vec::new();
    collect_images(&doc, &resources, &mut images, 0)?;
    Ok(images)
}

/// The single code image on `page`, read back as a module matrix.
pub fn embedded_code_modules(pdf: &[u8], page: u32, modules: usize) -> Result<Vec<bool>, Box<dyn Error>> {
    let images = embedded_images(pdf, page)?;
    if images.len() != 1 {
        return Err(format!("expected one image on page {}, found {}", page, images.len()).into());
    }
    Ok(images[0].modules(modules))
}

fn collect_images(
    doc: &LopdfDocument,
    resources: &Dictionary,
    out: &mut Vec<EmbeddedImage>,
    depth: usize,
) -> Result<(), Box<dyn Error>> {
    if depth > 8 {
        return Err("form XObjects nested too deeply".into());
    }
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Ok(());
    };
    for (_, xobject) in resolve(doc, xobjects)?.as_dict()?.iter() {
        let stream = resolve(doc, xobject)?.as_stream()?;
        match stream.dict.get(b"Subtype").and_then(|s| s.as_name()) {
            Ok(b"Image") => out.push(decode_image(doc, stream)?),
            Ok(b"Form") => {
                if let Ok(inner) = stream.dict.get(b"Resources") {
                    let inner = resolve(doc, inner)?.as_dict()?;
                    collect_images(doc, inner, out, depth + 1)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn decode_image(doc: &LopdfDocument, stream: &Stream) -> Result<EmbeddedImage, Box<dyn Error>> {
    let width = resolve(doc, stream.dict.get(b"Width")?)?.as_i64()? as usize;
    let height = resolve(doc, stream.dict.get(b"Height")?)?.as_i64()? as usize;
    let components = match resolve(doc, stream.dict.get(b"ColorSpace")?)?.as_name()? {
        b"DeviceGray" => 1,
        b"DeviceRGB" => 3,
        other => return Err(format!("unsupported colour space {}", String::from_utf8_lossy(other)).into()),
    };
    let samples = samples(stream, width * height * components)?;
    let gray = samples
        .chunks(components)
        .map(|px| (px.iter().map(|v| u32::from(*v)).sum::<u32>() / components as u32) as u8)
        .collect();

    let alpha = match stream.dict.get(b"SMask") {
        Ok(mask) => {
            let mask = resolve(doc, mask)?.as_stream()?;
            Some(self::samples(mask, width * height)?)
        }
        Err(_) => None,
    };
    Ok(EmbeddedImage {
        width,
        height,
        gray,
        alpha,
    })
}

/// Raw 8-bit samples of an image stream, checked against the expected length.
fn samples(stream: &Stream, expected: usize) -> Result<Vec<u8>, Box<dyn Error>> {
    let bits = stream.dict.get(b"BitsPerComponent").and_then(|b| b.as_i64()).unwrap_or(8);
    if bits != 8 {
        return Err(format!("expected 8 bits per component, found {}", bits).into());
    }
    let data = if stream.dict.has(b"Filter") {
        stream.decompressed_content()?
    } else {
        stream.content.clone()
    };
    if data.len() < expected {
        return Err(format!("image data has {} bytes, expected {}", data.len(), expected).into());
    }
    Ok(data)
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Result<&'a Object, lopdf::Error> {
    match obj {
        Object::Reference(id) => doc.get_object(*id),
        other => Ok(other),
    }
}
