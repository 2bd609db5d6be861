//! Prompt text for classification and answer generation

use vca_core::models::analysis::{DEFAULT_INTENT, DEFAULT_TOPIC};
use vca_core::{Analysis, Language};

/// System instruction for query classification
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You are a financial analysis assistant for Indian taxation and accounting.
Analyze the user's query to extract key information and classify the topic.
Output a JSON with:
1. \"topic\": Main financial/legal topic (taxation, GST, auditing, etc.)
2. \"search_terms\": List of 3-5 search terms for legal information
3. \"intent\": User's probable intent (information, calculation, advice)
4. \"entities\": Any mentioned financial values, dates, or organizations";

/// Legal context used when retrieval produced nothing
pub const NO_LEGAL_INFORMATION: &str = "No specific legal information found.";

const FORMATTING_RULES: [&str; 5] = [
    "Use numbered points for sequential information (steps, procedures)",
    "Use bullet points for key facts and information",
    "Group related information together under clear headings",
    "Highlight important numbers, dates, or amounts in a clear way",
    "Organize information in a logical flow from general to specific",
];

const PRINCIPLES: [&str; 7] = [
    "Be factual and avoid speculation.",
    "Provide citations for legal information.",
    "Explain complex topics in simple terms.",
    "When calculations are involved, show steps clearly.",
    "Maintain a professional yet friendly tone.",
    "Do not provide outdated information - if unsure, state limitations.",
    "If the query is outside your expertise, acknowledge limitations.",
];

pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Hi => "Respond in Hindi.",
        Language::En => "Respond in English.",
    }
}

/// System instruction for answer generation
pub fn composer_system_prompt(language: Language) -> String {
    let mut prompt = String::from(
        "You are a virtual Chartered Accountant specialized in Indian taxation, finance, and accounting laws.\n\
         Provide accurate, clear, and helpful responses to user queries.\n\
         Include specific references to relevant Indian laws, regulations, or guidelines when applicable.\n\
         Keep responses concise yet comprehensive.\n",
    );
    prompt.push_str(language_instruction(language));
    prompt.push_str("\n\nFormat your responses in a structured, easy-to-read bullet point format:\n");
    for rule in FORMATTING_RULES {
        prompt.push_str("- ");
        prompt.push_str(rule);
        prompt.push('\n');
    }
    prompt.push_str("\nHere are key principles to follow:\n");
    for (i, principle) in PRINCIPLES.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, principle));
    }
    prompt
}

/// User message carrying the query, its analysis and the retrieved legal context
pub fn composer_user_message(query: &str, analysis: &Analysis, legal_info: &[String]) -> String {
    let legal_context = if legal_info.is_empty() {
        NO_LEGAL_INFORMATION.to_string()
    } else {
        legal_info.join("\n")
    };

    let topic = non_blank_or(&analysis.topic, DEFAULT_TOPIC);
    let intent = non_blank_or(&analysis.intent, DEFAULT_INTENT);

    format!(
        "USER QUERY: {query}\n\
         \n\
         QUERY ANALYSIS:\n\
         Topic: {topic}\n\
         Intent: {intent}\n\
         \n\
         RELEVANT LEGAL INFORMATION:\n\
         {legal_context}\n\
         \n\
         Please provide a helpful response to the user's query."
    )
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}
