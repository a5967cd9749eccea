//! Static catalogue of avatar models and styles

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AiModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvatarStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn available_models() -> Vec<AiModel> {
    vec![
        AiModel {
            id: "gemini-pro-vision",
            name: "Google Gemini Pro Vision",
            description: "Advanced multimodal AI for image understanding and generation",
            status: "available",
        },
        AiModel {
            id: "dall-e-3",
            name: "OpenAI DALL-E 3",
            description: "State-of-the-art image generation model",
            status: "available",
        },
        AiModel {
            id: "custom-model",
            name: "Custom Try-On Model",
            description: "Specialized model for virtual clothing try-on",
            status: "coming_soon",
        },
    ]
}

pub fn avatar_styles() -> Vec<AvatarStyle> {
    vec![
        AvatarStyle {
            id: "casual",
            name: "Casual",
            description: "Everyday casual wear",
        },
        AvatarStyle {
            id: "formal",
            name: "Formal",
            description: "Business and formal attire",
        },
        AvatarStyle {
            id: "trendy",
            name: "Trendy",
            description: "Latest fashion trends",
        },
        AvatarStyle {
            id: "vintage",
            name: "Vintage",
            description: "Classic vintage styles",
        },
        AvatarStyle {
            id: "seasonal",
            name: "Seasonal",
            description: "Season-appropriate clothing",
        },
    ]
}
