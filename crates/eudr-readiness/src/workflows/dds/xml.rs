use super::{DueDiligenceStatement, DEFORESTATION_CUTOFF};

const NAMESPACE: &str = "http://ec.europa.eu/traces/eudr/v1";

pub(super) fn render(statement: &DueDiligenceStatement) -> String {
    let issued_at = statement.issued_at.to_rfc3339();
    let mut doc = XmlDocument::default();

    doc.raw("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    doc.raw(&format!(
        "<EUDR_DueDiligenceStatement xmlns=\"{NAMESPACE}\" version=\"1.0\">"
    ));

    doc.open("Header");
    doc.element("ReferenceNumber", &statement.reference_number);
    doc.element("SubmissionDate", &issued_at);
    doc.element("DocumentType", "DDS");
    doc.close("Header");

    doc.open("Operator");
    doc.element("Name", &statement.operator_name);
    doc.element("Country", &statement.operator_country);
    doc.element("RegistrationNumber", "TBD");
    doc.close("Operator");

    doc.open("Product");
    doc.element("CommodityType", &statement.commodity);
    doc.element("HSCode", &statement.hs_code);
    doc.open("Quantity");
    doc.element("Value", &statement.net_mass_kg.to_string());
    doc.element("Unit", "KG");
    doc.close("Quantity");
    doc.close("Product");

    doc.open("ProductionInformation");
    doc.element("CountryOfProduction", &statement.operator_country);
    doc.element(
        "GeolocationDataAttached",
        bool_text(statement.geolocation_attached),
    );
    doc.close("ProductionInformation");

    doc.open("Transaction");
    doc.element("InvoiceNumber", &statement.invoice_number);
    doc.element("ShipmentDate", &statement.shipment_date.to_string());
    if let Some(port) = &statement.port_of_entry {
        doc.element("PortOfEntry", port);
    }
    if let Some(mode) = &statement.transport_mode {
        doc.element("TransportMode", mode);
    }
    doc.open("Importer");
    doc.element("Name", &statement.importer_name);
    doc.element("Address", &statement.importer_address);
    doc.element("Country", &statement.importer_country);
    if let Some(eori) = &statement.importer_eori {
        doc.element("EORI", eori);
    }
    doc.close("Importer");
    doc.close("Transaction");

    doc.open("RiskAssessment");
    doc.element("AssessmentReference", &statement.assessment_id.to_string());
    doc.element("RiskLevel", statement.risk_level.label());
    doc.element("AssessmentDate", &statement.assessment_date.to_string());
    doc.close("RiskAssessment");

    doc.open("ComplianceDeclaration");
    doc.element("DeforestationFree", bool_text(statement.deforestation_free));
    doc.element("LegallyProduced", "true");
    doc.element("CutoffDate", DEFORESTATION_CUTOFF);
    doc.element("DeclarationDate", &issued_at);
    doc.close("ComplianceDeclaration");

    doc.raw("</EUDR_DueDiligenceStatement>");
    doc.finish()
}

#[derive(Default)]
struct XmlDocument {
    out: String,
    depth: usize,
}

impl XmlDocument {
    fn raw(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.out.push_str("  ");
        }
    }

    fn open(&mut self, name: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    fn element(&mut self, name: &str, value: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        self.out.push('>');
        push_escaped(&mut self.out, value);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    fn finish(mut self) -> String {
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        let mut out = String::new();
        push_escaped(&mut out, "Kivu <Beans> & \"Co\"");
        assert_eq!(out, "Kivu &lt;Beans&gt; &amp; &quot;Co&quot;");
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut doc = XmlDocument::default();
        doc.raw("<Root>");
        doc.open("Header");
        doc.element("Type", "DDS");
        doc.close("Header");
        doc.raw("</Root>");

        assert_eq!(
            doc.finish(),
            "<Root>\n  <Header>\n    <Type>DDS</Type>\n  </Header>\n</Root>"
        );
    }
}
