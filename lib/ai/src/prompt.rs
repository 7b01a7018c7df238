//! Blog prompt templates.
//!
//! Each [`BlogFormat`] owns a fixed Markdown outline. Rendering substitutes
//! the topic into `{{topic}}` placeholders and nothing else, so the output
//! depends only on `(topic, format)`.

/// Blog layouts a caller can ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlogFormat {
    /// Long-form guide covering definition, types, benefits and outlook.
    #[default]
    Comprehensive,
    /// Side-by-side evaluation of alternatives.
    Comparison,
    /// Step-by-step instructions.
    HowTo,
    /// Numbered list of points.
    Listicle,
    /// News-style report.
    News,
}

impl BlogFormat {
    /// All formats, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Comprehensive,
        Self::Comparison,
        Self::HowTo,
        Self::Listicle,
        Self::News,
    ];

    /// Selects a format from a request tag.
    ///
    /// Never fails: absent or unrecognised tags select `Comprehensive`.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("comparison") => Self::Comparison,
            Some("howto") => Self::HowTo,
            Some("listicle") => Self::Listicle,
            Some("news") => Self::News,
            _ => Self::Comprehensive,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Comparison => "comparison",
            Self::HowTo => "howto",
            Self::Listicle => "listicle",
            Self::News => "news",
        }
    }

    /// The outline template for this format.
    #[must_use]
    pub fn template(self) -> PromptTemplate {
        let content = match self {
            Self::Comprehensive => COMPREHENSIVE,
            Self::Comparison => COMPARISON,
            Self::HowTo => HOWTO,
            Self::Listicle => LISTICLE,
            Self::News => NEWS,
        };
        PromptTemplate::new(self.tag(), content)
    }
}

/// A prompt with `{{name}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Template name (used for logging).
    pub name: &'static str,
    /// Template content with placeholders.
    pub content: &'static str,
}

impl PromptTemplate {
    #[must_use]
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    /// Renders the template with the given variables.
    ///
    /// Placeholders for variables not listed are left as-is.
    #[must_use]
    pub fn render(&self, variables: &[(&str, &str)]) -> String {
        let mut result = self.content.to_string();
        for (name, value) in variables {
            let placeholder = format!("{{{{{name}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

/// Renders the full instruction for a blog post about `topic`.
#[must_use]
pub fn render_prompt(topic: &str, format: BlogFormat) -> String {
    let template = format.template();
    tracing::trace!(template = template.name, "Rendering blog prompt");
    template.render(&[("topic", topic)])
}

/// Title reported alongside generated content.
///
/// Always the comprehensive-guide title, whatever format produced the body;
/// existing consumers match on this string.
#[must_use]
pub fn research_title(query: &str) -> String {
    format!("{query}: A Comprehensive Guide")
}

const COMPREHENSIVE: &str = "\
Write a well-structured, engaging blog post about: {{topic}}

Please create a complete blog article with the following structure:

# {{topic}}: A Comprehensive Guide

## Introduction
- Engaging opening that hooks the reader
- Brief overview of what will be covered
- Why this topic is important/relevant

## What is {{topic}}?
- Clear definition and explanation
- Key concepts and terminology
- Historical background or context

## Types/Categories of {{topic}}
- Different types, categories, or approaches
- Detailed explanation of each type
- When to use each type/approach

## Key Benefits and Applications
- Main advantages and benefits
- Real-world applications and use cases
- Industries or areas where it's most valuable

## How to Get Started with {{topic}}
- Step-by-step guide for beginners
- Essential tools, resources, or requirements
- Best practices and tips

## Common Challenges and Solutions
- Typical problems or obstacles
- Practical solutions and workarounds
- Expert advice and recommendations

## Latest Trends and Future Outlook
- Current trends and developments
- Emerging technologies or approaches
- Future predictions and opportunities

## Conclusion
- Summary of key points
- Final thoughts and recommendations
- Call to action for readers

Format the entire response in markdown with proper headings, bullet points, numbered lists, and bold text where appropriate. Make it engaging, informative, and ready to publish as a blog post. Include specific examples and actionable advice throughout.
";

const COMPARISON: &str = "\
Write a well-structured, engaging blog post about: {{topic}}

Please create a detailed comparison blog post with the following structure:

# {{topic}}: Complete Comparison Guide

## Introduction
- Why comparing {{topic}} options is important
- What this comparison will cover
- How to use this guide

## Overview of Options
- Brief introduction to each option/alternative
- Key differentiating factors
- Target audiences for each

## Detailed Comparison

### Option 1: [Name]
- **Pros:** List of advantages
- **Cons:** List of disadvantages
- **Best for:** Ideal use cases
- **Pricing:** Cost considerations
- **Features:** Key capabilities

### Option 2: [Name]
- **Pros:** List of advantages
- **Cons:** List of disadvantages
- **Best for:** Ideal use cases
- **Pricing:** Cost considerations
- **Features:** Key capabilities

### Option 3: [Name]
- **Pros:** List of advantages
- **Cons:** List of disadvantages
- **Best for:** Ideal use cases
- **Pricing:** Cost considerations
- **Features:** Key capabilities

## Side-by-Side Comparison Table
Create a comparison table with key features, pricing, and ratings

## Which Should You Choose?
- Decision framework
- Recommendations based on different needs
- Final verdict

## Conclusion
- Summary of key differences
- Final recommendations
- Next steps for readers

Format with clear headings, comparison tables, bullet points, and bold text. Include specific examples and real-world scenarios.
";

const HOWTO: &str = "\
Write a well-structured, engaging blog post about: {{topic}}

Please create a detailed how-to guide with the following structure:

# How to {{topic}}: Complete Step-by-Step Guide

## Introduction
- What you'll learn in this guide
- Who this guide is for
- What you'll need to get started

## Prerequisites
- Required knowledge or skills
- Tools and resources needed
- Time investment required

## Step-by-Step Instructions

### Step 1: [First Step]
- Detailed explanation
- What to do exactly
- Common mistakes to avoid
- Expected outcome

### Step 2: [Second Step]
- Detailed explanation
- What to do exactly
- Common mistakes to avoid
- Expected outcome

### Step 3: [Third Step]
- Detailed explanation
- What to do exactly
- Common mistakes to avoid
- Expected outcome

[Continue with more steps as needed]

## Troubleshooting
- Common problems and solutions
- Warning signs to watch for
- When to seek help

## Advanced Tips
- Pro tips for better results
- Advanced techniques
- Optimization strategies

## Conclusion
- Summary of what was accomplished
- Next steps and further learning
- Additional resources

Format with numbered steps, bullet points, bold text for important points, and include practical examples throughout.
";

const LISTICLE: &str = "\
Write a well-structured, engaging blog post about: {{topic}}

Please create an engaging listicle with the following structure:

# [Number] Essential Things You Need to Know About {{topic}}

## Introduction
- Hook the reader with an interesting fact or question
- Preview what the list will cover
- Why this list matters

## 1. [First Point]
- Clear, engaging headline
- Detailed explanation
- Why this matters
- Practical example or tip

## 2. [Second Point]
- Clear, engaging headline
- Detailed explanation
- Why this matters
- Practical example or tip

## 3. [Third Point]
- Clear, engaging headline
- Detailed explanation
- Why this matters
- Practical example or tip

[Continue with 7-10 total points]

## Bonus Tip
- Extra valuable insight
- Something most people don't know
- Advanced or insider information

## Conclusion
- Recap the most important points
- Encourage action
- Provide next steps

Format with engaging headlines, bullet points, bold text, and include real examples and actionable advice for each point.
";

const NEWS: &str = "\
Write a well-structured, engaging blog post about: {{topic}}

Please create a news-style blog post with the following structure:

# Breaking: Latest Developments in {{topic}}

## Executive Summary
- Key highlights in bullet points
- Most important takeaways
- Impact assessment

## What's Happening
- Current situation overview
- Recent developments
- Timeline of events

## Key Players and Stakeholders
- Who's involved
- Their roles and positions
- Statements and reactions

## Impact Analysis
- Short-term implications
- Long-term consequences
- Who will be affected

## Expert Opinions
- Industry expert quotes
- Analysis and predictions
- Different perspectives

## What This Means for You
- Personal impact
- Action items
- Opportunities and risks

## Looking Ahead
- Future predictions
- What to watch for
- Upcoming milestones

## Conclusion
- Summary of key points
- Final analysis
- Call to action

Format like a professional news article in markdown with clear headlines, bullet points, bold text for key facts, quotes, data points, and factual information. Include concrete examples throughout.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_is_deterministic() {
        for format in BlogFormat::ALL {
            assert_eq!(
                render_prompt("Rust async", format),
                render_prompt("Rust async", format),
                "{} changed between renders",
                format.tag()
            );
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_comprehensive() {
        for tag in [None, Some(""), Some("essay"), Some("HowTo")] {
            let format = BlogFormat::from_tag(tag);
            assert_eq!(format, BlogFormat::Comprehensive);
            assert_eq!(
                render_prompt("Kafka", format),
                render_prompt("Kafka", BlogFormat::Comprehensive)
            );
        }
    }

    #[test]
    fn tags_round_trip() {
        for format in BlogFormat::ALL {
            assert_eq!(BlogFormat::from_tag(Some(format.tag())), format);
        }
    }

    #[test]
    fn each_format_has_its_own_heading() {
        let topic = "Observability";
        let expected = [
            (BlogFormat::Comprehensive, "# Observability: A Comprehensive Guide"),
            (BlogFormat::Comparison, "# Observability: Complete Comparison Guide"),
            (BlogFormat::HowTo, "# How to Observability: Complete Step-by-Step Guide"),
            (
                BlogFormat::Listicle,
                "# [Number] Essential Things You Need to Know About Observability",
            ),
            (BlogFormat::News, "# Breaking: Latest Developments in Observability"),
        ];

        for (format, heading) in expected {
            let prompt = render_prompt(topic, format);
            assert!(
                prompt.starts_with(
                    "Write a well-structured, engaging blog post about: Observability\n"
                ),
                "{} is missing the base instruction",
                format.tag()
            );
            assert!(prompt.contains(heading), "{} is missing {heading}", format.tag());
            assert!(!prompt.contains("{{topic}}"));
        }
    }

    #[test]
    fn every_format_asks_for_markdown_and_examples() {
        for format in BlogFormat::ALL {
            let prompt = render_prompt("Zig", format);
            assert!(prompt.contains("bold text"), "{}", format.tag());
            assert!(prompt.contains("example"), "{}", format.tag());
        }
    }

    #[test]
    fn topic_text_is_not_re_expanded() {
        let prompt = render_prompt("{{topic}} braces", BlogFormat::News);
        assert!(prompt.contains("# Breaking: Latest Developments in {{topic}} braces"));
    }

    #[test]
    fn title_ignores_format() {
        assert_eq!(
            research_title("Observability"),
            "Observability: A Comprehensive Guide"
        );
    }

    #[test]
    fn template_leaves_unknown_placeholders() {
        let template = PromptTemplate::new("greeting", "Hello, {{name}}! Role: {{role}}.");
        assert_eq!(
            template.render(&[("name", "Ada")]),
            "Hello, Ada! Role: {{role}}."
        );
    }
}
