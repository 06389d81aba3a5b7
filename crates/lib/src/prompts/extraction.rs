//! # Asset Extraction Prompts
//!
//! The default templates sent to the completion provider. Both can be
//! overridden through the server configuration (`tasks.asset_extraction`).

/// The system prompt for the asset extraction call.
pub const ASSET_EXTRACTION_SYSTEM_PROMPT: &str = "You are an AI assistant that extracts structured asset information from web search results. You respond with a single JSON object and nothing else.";

/// The user prompt for the asset extraction call.
///
/// Placeholders: `{model_number}`, `{asset_classification}`, `{search_content}`
pub const ASSET_EXTRACTION_USER_PROMPT: &str = r#"Given the following search results about an asset:
Model Number: {model_number}
Asset Classification: {asset_classification}

Search Results:
{search_content}

Extract the following information and return ONLY a valid JSON object with these exact fields:
- asset_classification: The asset classification (string)
- manufacturer: The manufacturer name (string)
- model_number: The model number (string)
- product_line: The product line or series name (string)
- summary: Write a comprehensive 3-6 sentence summary with extensive technical details. For generators include: power output (kW/HP), voltage ratings, frequency, fuel type, cooling system, dimensions, weight, applications. For excavators include: operating weight, engine specs, digging depth, reach, bucket capacity. For trucks include: payload capacity, engine power, dimensions, applications. Always provide specific numbers when available (string)

Requirements:
- Return ONLY valid JSON, no extra text
- If a field cannot be determined, use ""
- Model number must match input
- Summary MUST be comprehensive and detailed (3-6 sentences)
- Include ALL available technical data from the search results
- If limited technical specs are available, describe general features, applications, and any available information
- Never leave the summary completely empty; always provide some description based on the available data

EXAMPLE summary: "The CAT336 Hydraulic Excavator is a large construction machine with an operating weight of 36,200 kg (79,800 lbs) and overall dimensions of 10.87m length x 3.19m width x 3.27m height. It features a Cat C7.1 ACERT engine producing 268 horsepower at 1800 rpm with a 7.01L displacement and Tier 4 Final emissions compliance. The excavator has a maximum digging depth of 7.32m, maximum reach of 11.24m, and bucket capacity ranging from 1.4 to 2.1 cubic meters depending on configuration. Its hydraulic system delivers 520 liters per minute of flow with a maximum operating pressure of 35,000 kPa. The machine includes joystick steering, automatic engine idle, and ECO mode, making it suited to heavy construction, excavation, and material handling."

JSON Response:
"#;

/// Fills an extraction template with the aggregated search content and the
/// asset identifiers.
pub fn format_extraction_prompt(
    template: &str,
    search_content: &str,
    model_number: &str,
    asset_classification: &str,
) -> String {
    template
        .replace("{model_number}", model_number)
        .replace("{asset_classification}", asset_classification)
        .replace("{search_content}", search_content)
}
