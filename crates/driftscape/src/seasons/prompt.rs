//! Randomized prompt assembly shared by every season.
//!
//! A prompt is a comma-joined list: style prefix, one scene, then a shuffled
//! tail of extras and optional modifiers (objects, time of day, atmosphere,
//! composition). The style prefix and scene always lead so the backend sees
//! the rendering instructions and subject first.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::Season;

/// Default rendering style, used 80% of the time.
const STYLE_PREFIX: &str = "Photorealistic, ultra-detailed, 8k, cinematic composition, \
     professional photography, natural lighting, crisp focus, \
     high dynamic range, rich textures, authentic atmosphere, \
     realistic depth of field, magazine quality";

/// Alternate artistic styles, rolled in 20% of prompts for variety.
const ALTERNATE_STYLES: &[&str] = &[
    "Whimsical, storybook illustration, watercolor, soft palette, hand-painted, no signature, no text",
    "Vintage postcard, warm tones, slight film grain, nostalgic, no signature, no text",
    "Painterly, oil painting, soft brush strokes, cozy mood, no signature, no text",
    "Impressionist style, visible brush strokes, play of light, vibrant colors, no signature, no text",
    "Digital art, concept art style, detailed matte painting, atmospheric, no signature, no text",
    "Fantasy art, ethereal, dreamlike, rich colors, magical atmosphere, no signature, no text",
    "Moody photography, film noir lighting, high contrast, dramatic shadows, no signature, no text",
];

const TIME_OF_DAY: &[&str] = &[
    "at golden hour",
    "at sunrise",
    "at sunset",
    "at dusk",
    "at midday",
    "in morning light",
    "in evening light",
    "at night",
    "under moonlight",
];

const ATMOSPHERE: &[&str] = &[
    "with dramatic clouds",
    "with soft mist",
    "with light fog",
    "with volumetric lighting",
    "with god rays",
    "with clear skies",
    "with diffused light through clouds",
];

const COMPOSITION: &[&str] = &[
    "wide angle view",
    "aerial view",
    "from ground level",
    "intimate close-up",
    "expansive vista",
    "rule of thirds composition",
    "depth of field emphasis",
];

// ── Content-backed season ──────────────────────────────────────────

/// A season defined entirely by static content tables.
///
/// All eleven built-in seasons are instances of this type; the tables live
/// in the catalog as `const` data.
#[derive(Debug, Clone, Copy)]
pub struct SeasonContent {
    /// Display name.
    pub name: &'static str,
    /// Scene subjects — exactly one per prompt.
    pub scenes: &'static [&'static str],
    /// Enhancing elements — one to three per prompt.
    pub extras: &'static [&'static str],
    /// Props that may appear — "with a ..." phrasing, half the time.
    pub objects: &'static [&'static str],
    /// Fixed suffix appended to every prompt, if any.
    pub suffix: Option<&'static str>,
}

impl Season for SeasonContent {
    fn name(&self) -> &str {
        self.name
    }

    fn prompt(&self, rng: &mut dyn RngCore) -> String {
        let scene = self.scenes.choose(rng).copied().unwrap_or(self.name);

        // 20% chance of an alternate artistic style.
        let style = if rng.gen_bool(0.2) {
            ALTERNATE_STYLES.choose(rng).copied().unwrap_or(STYLE_PREFIX)
        } else {
            STYLE_PREFIX
        };

        // 1–3 extras, weighted toward 2.
        let count = extra_count(rng).min(self.extras.len());
        let mut tail: Vec<&str> = self
            .extras
            .choose_multiple(rng, count)
            .copied()
            .collect();

        let mut object_phrase = None;
        if !self.objects.is_empty() && rng.gen_bool(0.5) {
            object_phrase = Some(object_clause(self.objects, rng));
        }

        if rng.gen_bool(0.4)
            && let Some(time) = TIME_OF_DAY.choose(rng).copied()
        {
            tail.push(time);
        }
        if rng.gen_bool(0.3)
            && let Some(cond) = ATMOSPHERE.choose(rng).copied()
        {
            tail.push(cond);
        }
        if rng.gen_bool(0.25)
            && let Some(comp) = COMPOSITION.choose(rng).copied()
        {
            tail.push(comp);
        }

        // Shuffle everything after the style prefix and scene.
        tail.shuffle(rng);

        let mut parts: Vec<String> = Vec::with_capacity(tail.len() + 3);
        parts.push(style.to_string());
        parts.push(scene.to_string());
        parts.extend(tail.iter().map(|s| s.to_string()));
        if let Some(obj) = object_phrase {
            // Anywhere within the tail, never before the scene.
            let at = 2 + rng.gen_range(0..=tail.len());
            parts.insert(at, obj);
        }
        if let Some(suffix) = self.suffix {
            parts.push(suffix.to_string());
        }

        parts.join(", ")
    }
}

/// Roll the number of extras: 1, 2, or 3, weighted [0.3, 0.5, 0.2].
fn extra_count(rng: &mut dyn RngCore) -> usize {
    let roll: f64 = rng.r#gen();
    if roll < 0.3 {
        1
    } else if roll < 0.8 {
        2
    } else {
        3
    }
}

/// Build a "with a ..." clause naming one or two props (60/40 split).
fn object_clause(objects: &'static [&'static str], rng: &mut dyn RngCore) -> String {
    let count = if rng.gen_bool(0.6) { 1 } else { 2 };
    let picked: Vec<&str> = objects
        .choose_multiple(rng, count)
        .copied()
        .collect();
    match picked.as_slice() {
        [one] => format!("with a {one}"),
        [one, two] => format!("with a {one} and {two}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEASON: SeasonContent = SeasonContent {
        name: "Test",
        scenes: &["a quiet meadow", "a mountain lake"],
        extras: &["soft light", "gentle wind", "wildflowers"],
        objects: &["wooden bench", "stone path"],
        suffix: Some("test atmosphere"),
    };

    #[test]
    fn prompt_always_contains_one_scene_and_an_extra() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let prompt = TEST_SEASON.prompt(&mut rng);
            let scenes = TEST_SEASON
                .scenes
                .iter()
                .filter(|s| prompt.contains(*s))
                .count();
            assert_eq!(scenes, 1, "expected exactly one scene in: {prompt}");
            assert!(
                TEST_SEASON.extras.iter().any(|e| prompt.contains(e)),
                "expected at least one extra in: {prompt}"
            );
        }
    }

    #[test]
    fn suffix_always_terminates_prompt() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let prompt = TEST_SEASON.prompt(&mut rng);
            assert!(prompt.ends_with("test atmosphere"));
        }
    }

    #[test]
    fn extra_count_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n = extra_count(&mut rng);
            assert!((1..=3).contains(&n));
        }
    }

    #[test]
    fn object_clause_names_one_or_two_props() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let clause = object_clause(TEST_SEASON.objects, &mut rng);
            assert!(clause.starts_with("with a "));
        }
    }

    #[test]
    fn prompts_vary_between_calls() {
        let mut rng = rand::thread_rng();
        let prompts: Vec<String> = (0..20).map(|_| TEST_SEASON.prompt(&mut rng)).collect();
        let first = &prompts[0];
        assert!(
            prompts.iter().any(|p| p != first),
            "20 draws produced identical prompts"
        );
    }
}
