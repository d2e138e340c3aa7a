//! Fixed FHIR instruction prompt

/// Build the instruction prompt for a medical transcription.
///
/// The transcription is embedded verbatim; nothing about it is interpreted.
pub fn build_fhir_prompt(transcription: &str) -> String {
    format!(
        "You are an AI assistant for medical transcription analysis and clinical decision \
support. Read the transcription below and produce a structured response in FHIR \
(Fast Healthcare Interoperability Resources) format.

Medical Transcription:
{transcription}

Provide a thorough analysis covering potential diagnoses (with differential diagnosis and \
testing that supports medical decision making), medications, procedures, and recommended \
follow-up or treatment. Return a JSON object containing these FHIR resources:

1. Patient
2. Condition (potential diagnoses)
3. MedicationStatement (medications mentioned)
4. Procedure (procedures mentioned or recommended)
5. CarePlan (recommendations and follow-up actions)

Each resource must follow the FHIR structure and carry the relevant details from the \
transcription."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_transcription_verbatim() {
        let text = "Patient reports {fever} of 39.5C\nsince Monday.";
        let prompt = build_fhir_prompt(text);
        assert!(prompt.contains(text));
    }

    #[test]
    fn test_prompt_names_fhir_resources() {
        let prompt = build_fhir_prompt("");
        for resource in ["Patient", "Condition", "MedicationStatement", "Procedure", "CarePlan"] {
            assert!(prompt.contains(resource), "missing {}", resource);
        }
    }
}
