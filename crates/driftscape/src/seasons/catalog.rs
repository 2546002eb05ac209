//! The built-in season catalog: eleven seasons and holidays as const
//! content tables.
//!
//! Content is deliberately compact — a handful of curated scenes, extras,
//! and props per season. The assembly randomization in the prompt module
//! multiplies these into thousands of distinct prompts.

use super::prompt::SeasonContent;

/// Every built-in season, keyed by the id the weight table uses.
pub fn builtin_seasons() -> [(&'static str, SeasonContent); 11] {
    [
        ("christmas", CHRISTMAS),
        ("winter", WINTER),
        ("new_years", NEW_YEARS),
        ("fall", FALL),
        ("summer", SUMMER),
        ("spring", SPRING),
        ("thanksgiving", THANKSGIVING),
        ("fourth_july", FOURTH_JULY),
        ("easter", EASTER),
        ("halloween", HALLOWEEN),
        ("valentines", VALENTINES),
    ]
}

pub const CHRISTMAS: SeasonContent = SeasonContent {
    name: "Christmas",
    scenes: &[
        "cozy fireplace with stockings hung by the chimney",
        "Christmas tree glowing with lights in a dark living room",
        "snow-covered cottage at dusk with lit windows",
        "holiday market with wooden stalls and twinkling lights",
        "Santa's sleigh crossing the night sky",
        "reindeer standing in a snowy pine field",
        "carolers singing on a snowy Victorian street",
        "gingerbread house with candy decorations",
        "ice skating on a frozen pond ringed with lanterns",
        "snowy town square with a giant decorated tree",
        "toy train circling a decorated tree",
        "children building a snowman at twilight",
    ],
    extras: &[
        "snow falling softly",
        "warm glow from lanterns",
        "gold and red ornaments",
        "soft bokeh lights",
        "steam rising from mugs of hot cocoa",
        "frosted window patterns",
        "twinkling fairy lights",
        "ribbons and bows",
        "holly and mistletoe",
    ],
    objects: &[
        "nutcracker doll",
        "gift-wrapped present",
        "snow globe",
        "wooden sled",
        "holiday wreath",
        "brass bell",
        "vintage ornament",
        "poinsettia plant",
    ],
    suffix: Some("festive atmosphere"),
};

pub const WINTER: SeasonContent = SeasonContent {
    name: "Winter",
    scenes: &[
        "snow-laden evergreen forest under pale sunlight",
        "frozen lake reflecting a violet sky",
        "mountain cabin half-buried in fresh snow",
        "icicles hanging from a timber-framed roof",
        "deer crossing a silent snowy meadow",
        "northern lights over a white valley",
        "country road disappearing into soft snowfall",
        "frost-covered birch grove at dawn",
        "stone bridge dusted with powder snow",
        "cozy reading nook beside a frosted window",
    ],
    extras: &[
        "crisp blue shadows on snow",
        "breath fogging in cold air",
        "long winter light",
        "untouched powder drifts",
        "smoke curling from a chimney",
        "sparkling hoarfrost",
        "muted monochrome palette",
    ],
    objects: &[
        "pair of snowshoes",
        "wool blanket",
        "cast-iron kettle",
        "wooden ski",
        "frozen lantern",
        "bird feeder",
    ],
    suffix: None,
};

pub const NEW_YEARS: SeasonContent = SeasonContent {
    name: "New Year's",
    scenes: &[
        "fireworks bursting over a city skyline at midnight",
        "champagne toast with golden confetti falling",
        "rooftop party overlooking glittering streets",
        "clock tower striking twelve under fireworks",
        "ballroom full of streamers and sparklers",
        "quiet snowy street lit by celebration lights",
        "crowd releasing paper lanterns into the night",
        "table set with gold and silver party favors",
    ],
    extras: &[
        "golden confetti in the air",
        "sparklers tracing light",
        "champagne bubbles catching light",
        "metallic streamers",
        "midnight blue sky",
        "celebratory glow",
    ],
    objects: &[
        "champagne flute",
        "party horn",
        "glittering countdown clock",
        "masquerade mask",
        "bottle in an ice bucket",
    ],
    suffix: Some("celebratory mood"),
};

pub const FALL: SeasonContent = SeasonContent {
    name: "Fall",
    scenes: &[
        "winding lane beneath fiery maple canopies",
        "pumpkin patch on a misty farm morning",
        "orchard ladder leaning against a heavy apple tree",
        "covered bridge over a leaf-strewn creek",
        "harvest farm stand stacked with gourds",
        "rain-wet cobblestones mirroring amber trees",
        "cabin porch with steaming cider mugs",
        "geese crossing a golden stubble field",
        "forest trail carpeted in red and orange leaves",
        "hay bales dotting rolling autumn hills",
    ],
    extras: &[
        "falling leaves drifting",
        "low golden light",
        "morning mist over fields",
        "rich russet and amber tones",
        "woodsmoke in the air",
        "dew on spider webs",
        "baskets of apples",
    ],
    objects: &[
        "pumpkin",
        "rake",
        "wicker basket",
        "flannel blanket",
        "mug of cider",
        "scarecrow",
    ],
    suffix: None,
};

pub const SUMMER: SeasonContent = SeasonContent {
    name: "Summer",
    scenes: &[
        "turquoise cove with white sand and beach umbrellas",
        "wildflower meadow humming under a high sun",
        "lakeside dock with rope swing at golden hour",
        "roadside fruit stand under a striped awning",
        "sailboats drifting across a glittering bay",
        "backyard garden party with string lights",
        "lighthouse on a sun-bleached headland",
        "kids chasing waves on a long sandy shore",
        "hammock strung between palms",
        "poolside with sun loungers and clear water",
    ],
    extras: &[
        "heat shimmer on the horizon",
        "bright saturated colors",
        "gentle sea breeze implied",
        "lens-catching sun sparkle on water",
        "lush green foliage",
        "distant sailboats",
    ],
    objects: &[
        "beach ball",
        "surfboard",
        "picnic basket",
        "straw hat",
        "ice cream cone",
        "kite",
    ],
    suffix: None,
};

pub const SPRING: SeasonContent = SeasonContent {
    name: "Spring",
    scenes: &[
        "cherry blossoms raining petals over a park path",
        "tulip field striped in saturated color",
        "lambs grazing a bright green hillside",
        "rain shower passing over a blooming orchard",
        "garden beds freshly planted beside a cottage",
        "creek swollen with snowmelt through budding woods",
        "robins nesting in a flowering dogwood",
        "greenhouse glowing with seedlings at dawn",
        "meadow of daffodils under fast-moving clouds",
    ],
    extras: &[
        "petals drifting on the breeze",
        "fresh rain on leaves",
        "soft pastel palette",
        "puddles reflecting blue sky",
        "buzzing pollinators implied",
        "new green growth",
    ],
    objects: &[
        "watering can",
        "bird nest",
        "garden trowel",
        "picket fence",
        "rain boots",
        "flower basket",
    ],
    suffix: None,
};

pub const THANKSGIVING: SeasonContent = SeasonContent {
    name: "Thanksgiving",
    scenes: &[
        "long farmhouse table set for a harvest feast",
        "golden-brown turkey at the center of a laden table",
        "family gathering in a warm candlelit dining room",
        "kitchen counter crowded with pies cooling",
        "cornucopia spilling squash and grapes",
        "autumn wreath on a farmhouse door",
        "children carrying dishes to a crowded table",
        "fireplace glow over a post-dinner living room",
    ],
    extras: &[
        "candlelight on linen",
        "steam rising from serving dishes",
        "amber and burgundy tones",
        "gourds and ears of corn",
        "laughter implied in warm light",
        "rustic wooden textures",
    ],
    objects: &[
        "gravy boat",
        "pumpkin pie",
        "carving knife",
        "cider jug",
        "woven centerpiece",
    ],
    suffix: Some("warm gathering atmosphere"),
};

pub const FOURTH_JULY: SeasonContent = SeasonContent {
    name: "Fourth of July",
    scenes: &[
        "fireworks blooming over a small-town main street",
        "flag-draped porches along a parade route",
        "backyard barbecue with sparklers at dusk",
        "picnic blankets spread on a riverbank awaiting fireworks",
        "marching band passing bunting-hung storefronts",
        "lake reflecting red and blue starbursts",
        "families watching rockets from truck beds",
    ],
    extras: &[
        "red white and blue bunting",
        "sparkler trails",
        "smoke drifting from grills",
        "reflections of fireworks on water",
        "twilight-to-dark gradient sky",
        "festive crowds implied",
    ],
    objects: &[
        "american flag",
        "watermelon slice",
        "picnic cooler",
        "folding lawn chair",
        "sparkler",
    ],
    suffix: Some("patriotic celebration"),
};

pub const EASTER: SeasonContent = SeasonContent {
    name: "Easter",
    scenes: &[
        "painted eggs hidden among spring flowers",
        "wicker baskets on a dewy lawn at sunrise",
        "bunny peeking from a tulip bed",
        "pastel-decorated brunch table by an open window",
        "children hunting eggs across a blooming garden",
        "country church framed by flowering trees",
        "spring wreath of eggs and willow on a pale door",
    ],
    extras: &[
        "pastel pinks and yellows",
        "morning dew sparkling",
        "ribbons on baskets",
        "speckled eggs in grass",
        "soft sunrise light",
    ],
    objects: &[
        "chocolate rabbit",
        "woven basket",
        "painted egg",
        "stuffed lamb",
        "daffodil bouquet",
    ],
    suffix: None,
};

pub const HALLOWEEN: SeasonContent = SeasonContent {
    name: "Halloween",
    scenes: &[
        "jack-o-lanterns flickering on creaky porch steps",
        "haunted Victorian house under a full moon",
        "trick-or-treaters crossing a leaf-blown street",
        "foggy graveyard with leaning mossy stones",
        "black cat silhouetted on a picket fence",
        "cauldron bubbling in a candlelit cottage",
        "corn maze under a bruised twilight sky",
        "bats wheeling past a lit attic window",
    ],
    extras: &[
        "carved pumpkin glow",
        "drifting ground fog",
        "cobwebs catching candlelight",
        "crooked bare branches",
        "orange and violet palette",
        "moonlit silhouettes",
    ],
    objects: &[
        "witch's broom",
        "skeleton decoration",
        "candy bucket",
        "gnarled lantern",
        "scarecrow",
        "spellbook",
    ],
    suffix: Some("spooky atmosphere"),
};

pub const VALENTINES: SeasonContent = SeasonContent {
    name: "Valentine's Day",
    scenes: &[
        "candlelit table for two with roses",
        "heart-shaped balloons drifting over a city park",
        "love letters and wax seals on a writing desk",
        "couple sharing umbrella on a rainy rose-lit street",
        "patisserie window of heart-shaped confections",
        "picnic of strawberries and champagne at sunset",
        "cozy cafe corner with steamed-up windows",
    ],
    extras: &[
        "rose petals scattered",
        "soft candle glow",
        "blush pink and deep red tones",
        "ribbon-wrapped gifts",
        "champagne sparkle",
    ],
    objects: &[
        "bouquet of roses",
        "box of chocolates",
        "handwritten card",
        "heart-shaped locket",
        "vintage record player",
    ],
    suffix: Some("romantic atmosphere"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let seasons = builtin_seasons();
        let mut ids: Vec<&str> = seasons.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), seasons.len());
    }

    #[test]
    fn every_season_has_content() {
        for (id, content) in builtin_seasons() {
            assert!(!content.name.is_empty(), "{id} has no display name");
            assert!(content.scenes.len() >= 5, "{id} needs more scenes");
            assert!(content.extras.len() >= 4, "{id} needs more extras");
            assert!(!content.objects.is_empty(), "{id} has no objects");
        }
    }
}
