//! Built-in page content and the page catalog
//!
//! Two pages ship with the binary: the compliance checklist and the
//! implementation guide. Additional pages can be loaded from YAML with
//! [`crate::parser::parse_pages`] and merged in with [`Catalog::extend`].

use crate::error::{GuideError, GuideResult};
use crate::types::{Category, ChecklistItem, ColorTheme, ColumnShape, Page};

pub const CHECKLIST_SLUG: &str = "checklist";
pub const GUIDE_SLUG: &str = "guide";

pub const CHECKLIST_FILENAME: &str = "EU_AI_Act_Compliance_Checklist.xlsx";
pub const GUIDE_FILENAME: &str = "EU_AI_Act_Implementation_Guide.xlsx";

/// Ordered collection of pages, addressable by slug
#[derive(Debug, Clone)]
pub struct Catalog {
    pages: Vec<Page>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            pages: vec![compliance_checklist(), implementation_guide()],
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, slug: &str) -> GuideResult<&Page> {
        self.pages
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| GuideError::UnknownPage(slug.to_string()))
    }

    /// Add pages, validating each one. Slugs must not collide.
    pub fn extend(&mut self, pages: Vec<Page>) -> GuideResult<()> {
        for page in pages {
            page.validate()?;
            if self.pages.iter().any(|p| p.slug == page.slug) {
                return Err(GuideError::Validation(format!(
                    "Page '{}' is already defined",
                    page.slug
                )));
            }
            self.pages.push(page);
        }
        Ok(())
    }
}

/// The interactive compliance checklist
pub fn compliance_checklist() -> Page {
    let checklist = |name, theme| Category::new(name, theme, ColumnShape::Checklist);

    Page {
        slug: CHECKLIST_SLUG.to_string(),
        title: "EU AI Act Compliance Checklist".to_string(),
        filename: CHECKLIST_FILENAME.to_string(),
        categories: vec![
            checklist("Preparation", ColorTheme::Blue).with_items(vec![
                ChecklistItem::new(
                    "prep-1",
                    "Identify AI systems in your organization",
                    "Create an inventory of all AI systems used or developed by your organization",
                ),
                ChecklistItem::new(
                    "prep-2",
                    "Establish compliance team",
                    "Form a cross-functional team responsible for AI Act compliance",
                ),
                ChecklistItem::new(
                    "prep-3",
                    "Review EU AI Act requirements",
                    "Ensure key stakeholders understand the requirements of the EU AI Act",
                ),
                ChecklistItem::new(
                    "prep-4",
                    "Develop compliance roadmap",
                    "Create a timeline for achieving compliance before relevant deadlines",
                ),
                ChecklistItem::new(
                    "prep-5",
                    "Allocate resources",
                    "Ensure sufficient budget and resources are allocated for compliance activities",
                ),
            ]),
            checklist("Risk Assessment", ColorTheme::Amber).with_items(vec![
                ChecklistItem::new(
                    "assess-1",
                    "Determine risk category",
                    "Assess each AI system to determine if it falls under prohibited, high-risk, limited-risk, or minimal-risk categories",
                ),
                ChecklistItem::new(
                    "assess-2",
                    "Identify applicable requirements",
                    "Based on risk category, identify specific requirements applicable to each AI system",
                ),
                ChecklistItem::new(
                    "assess-3",
                    "Conduct gap analysis",
                    "Compare current practices against EU AI Act requirements to identify gaps",
                ),
                ChecklistItem::new(
                    "assess-4",
                    "Assess data governance",
                    "Review data collection, processing, and management practices for compliance",
                ),
                ChecklistItem::new(
                    "assess-5",
                    "Evaluate transparency measures",
                    "Assess current transparency practices against requirements",
                ),
                ChecklistItem::new(
                    "assess-6",
                    "Review human oversight mechanisms",
                    "Evaluate existing human oversight mechanisms for high-risk AI systems",
                ),
            ]),
            checklist("Implementation", ColorTheme::Green).with_items(vec![
                ChecklistItem::new(
                    "impl-1",
                    "Implement risk management system",
                    "Establish a risk management system for high-risk AI systems",
                ),
                ChecklistItem::new(
                    "impl-2",
                    "Enhance data governance",
                    "Implement data quality and governance measures for training, validation, and testing datasets",
                ),
                ChecklistItem::new(
                    "impl-3",
                    "Prepare technical documentation",
                    "Create comprehensive technical documentation for high-risk AI systems",
                ),
                ChecklistItem::new(
                    "impl-4",
                    "Implement logging capabilities",
                    "Ensure automatic recording of events while high-risk AI systems are operating",
                ),
                ChecklistItem::new(
                    "impl-5",
                    "Enhance transparency",
                    "Implement required transparency measures based on risk category",
                ),
                ChecklistItem::new(
                    "impl-6",
                    "Establish human oversight",
                    "Implement appropriate human oversight measures for high-risk AI systems",
                ),
                ChecklistItem::new(
                    "impl-7",
                    "Ensure accuracy and robustness",
                    "Implement measures to ensure accuracy, robustness, and cybersecurity",
                ),
            ]),
            checklist("Monitoring", ColorTheme::Purple).with_items(vec![
                ChecklistItem::new(
                    "monitor-1",
                    "Establish post-market monitoring",
                    "Implement a post-market monitoring system for high-risk AI systems",
                ),
                ChecklistItem::new(
                    "monitor-2",
                    "Conduct conformity assessment",
                    "Complete required conformity assessment procedures for high-risk AI systems",
                ),
                ChecklistItem::new(
                    "monitor-3",
                    "Register in EU database",
                    "Register high-risk AI systems in the EU database before placing on market",
                ),
                ChecklistItem::new(
                    "monitor-4",
                    "Affix CE marking",
                    "Affix CE marking to high-risk AI systems that have passed conformity assessment",
                ),
                ChecklistItem::new(
                    "monitor-5",
                    "Implement incident reporting",
                    "Establish procedures for reporting serious incidents and malfunctions",
                ),
                ChecklistItem::new(
                    "monitor-6",
                    "Regular compliance reviews",
                    "Schedule regular reviews to ensure ongoing compliance",
                ),
            ]),
        ],
    }
}

/// Step-by-step guidance per risk tier, plus the application timeline
pub fn implementation_guide() -> Page {
    let steps = |name, theme| Category::new(name, theme, ColumnShape::Steps);

    Page {
        slug: GUIDE_SLUG.to_string(),
        title: "EU AI Act Implementation Guide".to_string(),
        filename: GUIDE_FILENAME.to_string(),
        categories: vec![
            steps("High-Risk AI", ColorTheme::Amber).with_items(vec![
                ChecklistItem::new(
                    "high-1",
                    "Risk Management System",
                    "Establish a risk management system that runs throughout the entire lifecycle of the high-risk AI system.",
                ),
                ChecklistItem::new(
                    "high-2",
                    "Data Governance",
                    "Implement data governance and management practices, including examination of possible biases, collection, processing and use of data.",
                ),
                ChecklistItem::new(
                    "high-3",
                    "Technical Documentation",
                    "Prepare detailed technical documentation that demonstrates compliance with the requirements of the AI Act.",
                ),
                ChecklistItem::new(
                    "high-4",
                    "Record-Keeping",
                    "Ensure automatic recording of events ('logs') while the high-risk AI systems are operating.",
                ),
                ChecklistItem::new(
                    "high-5",
                    "Transparency",
                    "Design systems to be transparent, ensuring users understand capabilities and limitations.",
                ),
                ChecklistItem::new(
                    "high-6",
                    "Human Oversight",
                    "Implement appropriate human oversight measures to minimize risk.",
                ),
                ChecklistItem::new(
                    "high-7",
                    "Accuracy & Robustness",
                    "Ensure appropriate levels of accuracy, robustness, and cybersecurity.",
                ),
                ChecklistItem::new(
                    "high-8",
                    "Conformity Assessment",
                    "Conduct conformity assessment procedures before placing on the market or putting into service.",
                ),
                ChecklistItem::new(
                    "high-9",
                    "Registration",
                    "Register the high-risk AI system in the EU database before placing it on the market.",
                ),
            ]),
            steps("Limited-Risk AI", ColorTheme::Blue).with_items(vec![
                ChecklistItem::new(
                    "limited-1",
                    "Transparency for AI-Human Interactions",
                    "Ensure humans are informed they are interacting with an AI system, unless this is obvious from the circumstances.",
                ),
                ChecklistItem::new(
                    "limited-2",
                    "Transparency for Emotion Recognition",
                    "Inform people when they are subject to emotion recognition or categorization systems.",
                ),
                ChecklistItem::new(
                    "limited-3",
                    "Transparency for Deep Fakes",
                    "Clearly disclose that content has been artificially generated or manipulated (deep fakes).",
                ),
                ChecklistItem::new(
                    "limited-4",
                    "Documentation",
                    "Maintain documentation that demonstrates how transparency requirements are met.",
                ),
                ChecklistItem::new(
                    "limited-5",
                    "User Interface Design",
                    "Design user interfaces to clearly communicate when AI is being used and its limitations.",
                ),
            ]),
            steps("Minimal-Risk AI", ColorTheme::Green).with_items(vec![
                ChecklistItem::new(
                    "minimal-1",
                    "Voluntary Codes of Conduct",
                    "Consider adhering to voluntary codes of conduct for minimal-risk AI systems.",
                ),
                ChecklistItem::new(
                    "minimal-2",
                    "Documentation",
                    "Maintain basic documentation about the AI system's purpose and functionality.",
                ),
                ChecklistItem::new(
                    "minimal-3",
                    "Best Practices",
                    "Follow industry best practices for AI development and deployment.",
                ),
                ChecklistItem::new(
                    "minimal-4",
                    "Ethical Considerations",
                    "Consider ethical implications of AI systems even when not legally required.",
                ),
            ]),
            Category::new(
                "Implementation Timeline",
                ColorTheme::Purple,
                ColumnShape::Timeline,
            )
            .with_items(vec![
                ChecklistItem::milestone(
                    "timeline-1",
                    "May 2024",
                    "Entry into Force",
                    "The AI Act officially becomes law 20 days after publication in the Official Journal.",
                ),
                ChecklistItem::milestone(
                    "timeline-2",
                    "August 2024",
                    "Prohibited AI Systems",
                    "Provisions related to prohibited AI practices come into effect.",
                ),
                ChecklistItem::milestone(
                    "timeline-3",
                    "May 2025",
                    "Governance Bodies",
                    "AI Office and AI Board are established.",
                ),
                ChecklistItem::milestone(
                    "timeline-4",
                    "May 2026",
                    "GPAI Provisions",
                    "Provisions for general-purpose AI models come into effect.",
                ),
                ChecklistItem::milestone(
                    "timeline-5",
                    "May 2027",
                    "Full Implementation",
                    "All remaining provisions of the AI Act are in full effect.",
                ),
            ]),
        ],
    }
}
