use crate::workflows::mortgage::{DocumentCategory, PropertyDetails};

pub(crate) const VALUATION_SYSTEM: &str = "You are a Swiss real estate appraiser. \
You estimate market values of residential property in Switzerland in CHF. \
Answer with a single JSON object and nothing else.";

pub(crate) const DOCUMENT_SYSTEM: &str = "You review scanned documents submitted with Swiss \
mortgage applications. Read the image carefully, extract the key fields and report problems \
such as illegibility, missing pages, expired dates or a document of the wrong type. \
Answer with a single JSON object and nothing else.";

pub(crate) fn valuation_prompt(property: &PropertyDetails) -> String {
    let mut lines = vec![
        format!("Estimate the current market value of this {}.", property.kind.label()),
        format!("Address: {}", property.address_line()),
    ];
    if let Some(area) = property.living_area_sqm {
        lines.push(format!("Living area: {area} m2"));
    }
    if let Some(area) = property.plot_area_sqm {
        lines.push(format!("Plot area: {area} m2"));
    }
    if let Some(rooms) = property.rooms {
        lines.push(format!("Rooms: {rooms}"));
    }
    if let Some(year) = property.build_year {
        lines.push(format!("Build year: {year}"));
    }
    lines.push(String::new());
    lines.push(
        "Respond with JSON: {\"estimatedValue\": number, \"lowEstimate\": number, \
         \"highEstimate\": number, \"confidence\": \"low\" | \"medium\" | \"high\", \
         \"rationale\": string}"
            .to_string(),
    );
    lines.join("\n")
}

pub(crate) fn document_prompt(category: DocumentCategory, applicant_name: Option<&str>) -> String {
    let mut lines = vec![format!(
        "The applicant uploaded this image as their {}.",
        category.label()
    )];
    if let Some(name) = applicant_name {
        lines.push(format!(
            "The document should belong to {name}; flag it if the name differs."
        ));
    }
    lines.push(String::new());
    lines.push(
        "Respond with JSON: {\"documentType\": string, \"matchesCategory\": boolean, \
         \"isValid\": boolean, \"issues\": [string], \"extractedFields\": object}"
            .to_string(),
    );
    lines.join("\n")
}
