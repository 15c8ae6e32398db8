//! Built-in example prompts, each with a previously generated image.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub prompt: &'static str,
    pub image: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        prompt: "Muddy ground with autumn leaves seamless texture, trending on artstation, base color, albedo, 4k",
        image: "https://replicate.delivery/mgxm/9b8f4ec9-eef0-437f-a27a-cbd233d22407/out-0.png",
    },
    Example {
        prompt: "Lunar surface seamless texture, trending on artstation, base color, albedo, 4k",
        image: "https://replicate.delivery/mgxm/8f75db20-72d9-4917-bc86-db4ca5d73c35/out-0.png",
    },
    Example {
        prompt: "Tree bark seamless photoscan texture, trending on artstation, base color, albedo, 4k",
        image: "https://replicate.delivery/mgxm/7d3bc46c-612f-42cb-9347-317b2db1d3d6/out-0.png",
    },
    Example {
        prompt: "Flamingo painting",
        image: "https://replicate.delivery/pbxt/K2M3OVwEpSLxNdZDmEe8K5fIGN25TOUTQA7JnGb5n4fcsY2gA/out-0.jpg",
    },
    Example {
        prompt: "Ancient carvings trim sheet texture, trending on artstation, sandstone, base color, albedo, 4k",
        image: "https://replicate.delivery/mgxm/147f2329-db56-4a6a-a950-7a358f731fb7/out-0.png",
    },
    Example {
        prompt: "Wall made from chocolate bars seamless texture, trending on artstation, tasty, base color, albedo, 4k",
        image: "https://replicate.delivery/mgxm/9c645c58-82e8-4d88-bb7d-972472978698/out-0.png",
    },
    Example {
        prompt: "A painting with oranges and lemons, Picasso",
        image: "https://replicate.delivery/pbxt/N08AVoJ7ji7kBp2CeNLtl96C7kmYMwA4EbAd1BpPodzEPAOIA/out-0.jpg",
    },
    Example {
        prompt: "Monet, lilacs, bright, oil painting",
        image: "https://replicate.delivery/pbxt/1b4tM1hOSi7lGl9ks94Tdr9vFj8ON7uDe1eXRzQ51LUIiAcQA/out-0.jpg",
    },
];

/// Uniform pick from [`EXAMPLES`].
pub fn random_example<R: Rng + ?Sized>(rng: &mut R) -> &'static Example {
    &EXAMPLES[rng.random_range(0..EXAMPLES.len())]
}
