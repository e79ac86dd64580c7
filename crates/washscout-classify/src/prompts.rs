//! Classification rubrics sent to the language models.

pub(crate) const KEYWORD_RUBRIC: &str = r#"You classify car wash businesses from their name or description. Decide whether the business is a "Competitor", "Not Competitor" or "Can't say".

Competitor: the name signals an automated, drive-through or express exterior wash, using words such as "Express", "Xpress", "Flex Serve", "Quick Wash", "Tunnel" or "Exterior". Accept misspellings, variations and synonyms that suggest a fast, automated experience.

Not Competitor: the name signals a manual, customer-operated or add-on service, using words such as "Self Serve", "Full Serve", "Hand Wash", "Mobile", "Truck Wash", "Blue Beacon", "Window Tinting", "Detailing" or "Oil Change". These are traditional or niche providers.

Can't say: the name is generic and matches neither list, or it contains words such as "Lube" or "Auto".

If the name contains keywords from both the Competitor and the Not Competitor lists, answer Competitor.

Examples:
Input: "Drive-Thru Express Wash"
Output: Competitor

Input: "Eco Hand Wash & Detail"
Output: Not Competitor

Input: "Quick Lube"
Output: Can't say

Input: "Flex Serve Tunnel Wash and Lube"
Output: Competitor

Input: "Self Serve Car Wash and Oil Center"
Output: Not Competitor

Input: "Speedy Xpress Car Wash"
Output: Competitor

Input: "Downtown Detail & Hand Wash"
Output: Not Competitor

Answer with JSON containing "classification" and a short "explanation" that names the keywords you found.

Now classify this input:
"#;

pub(crate) const VISION_RUBRIC: &str = r#"You analyse publicly available images of a car wash location: a satellite view followed by photos uploaded by the business or its customers. Decide whether the location is an Express Tunnel Car Wash ("Competitor") or not ("Not a Competitor").

Criteria for an Express Tunnel Car Wash:

1. Tunnel structure (required)
- A long, narrow building or open-ended structure that cars enter and leave in a straight line.
- Distinct entry and exit points, such as arches or doors, often signed "Enter" and "Exit".
- Automated equipment inside: rollers, brushes, overhead sprayers, dryers. Exterior cleaning must be done by machines. People washing cars by hand inside the tunnel rule the location out.
- A wet or shiny exit apron suggests frequent use.
- Estimate the tunnel length. It should be at least about 34 feet (10 metres); short or rudimentary tunnels do not qualify.
- If no automated tunnel can be identified, the location is not an express tunnel.

2. Conveyor (strong indicator when visible)
- Guide rails, rollers or tracks on the floor inside or leading into the tunnel.
- Several cars queued in sequence inside or in front of the tunnel.

3. Drive-through experience
- Customers stay in their vehicles; cars enter one at a time.
- No staff cleaning the exterior during the tunnel pass and no interior cleaning under way (no open doors, no attendants vacuuming inside cars).

4. Branding and signage
- "Express", "Exterior", "Tunnel Wash", "Automatic Car Wash" or similar wording is a strong indicator.
- Signage that presents "Full Serve", "Hand Wash" or "Detailing" as the main service makes an express tunnel unlikely. A full-serve site is a competitor only if it also has a clearly visible, long, fully automated express tunnel; a short, open-roofed or sparsely equipped tunnel does not count.

5. Exclusions
- Truck washes (for example "Blue Beacon") are never competitors, even with a tunnel.
- Window tinting, oil change and gas station washes are not competitors unless a separate, standalone automated express tunnel is present.
- Mobile washes are not competitors unless they also run a fixed public location with a qualifying express tunnel.
- Self-service bays where customers wash their own cars are not express tunnels.

6. Vacuum stations (supporting evidence only)
- Rows of self-serve vacuums next to the tunnel exit are common at express sites but not required.

Respond with JSON only:
{"classification": "Competitor" | "Not a Competitor", "justification": "<visible features that support the decision, and any missing or ambiguous evidence>"}"#;

pub(crate) const VISION_USER_QUERY: &str = "Analyze the provided images for the car wash location and determine if it is an Express Tunnel Car Wash competitor based on the criteria.";

/// Full keyword prompt for one business name.
pub(crate) fn keyword_prompt(name: &str) -> String {
    format!("{KEYWORD_RUBRIC}{{{name}}}")
}
