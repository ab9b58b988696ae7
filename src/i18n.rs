use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Interface language. The selected value persists in the config file and
/// is re-read at startup; `zh` is the default for fresh installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    /// Label shown on the language toggle for the *other* language,
    /// i.e. what you switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::Zh => "EN",
            Language::En => "中文",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Zh => write!(f, "zh"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "cn" | "chinese" | "中文" => Ok(Language::Zh),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("unknown language: {other} (expected zh or en)")),
        }
    }
}

/// Look up a UI string for the given language. Unknown keys echo back
/// unchanged, so a missing entry degrades to showing the key.
pub fn tr(lang: Language, key: &str) -> String {
    let table = match lang {
        Language::Zh => &*ZH,
        Language::En => &*EN,
    };
    table.get(key).map(|s| (*s).to_string()).unwrap_or_else(|| key.to_string())
}

static ZH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Navigation
        ("home", "首页"),
        ("solutions", "解决方案"),
        ("products", "产品"),
        ("about", "关于我们"),
        ("contact", "联系我们"),
        // Homepage
        ("heroTitle", "激发智能未来，赋能企业增长"),
        (
            "heroDescription",
            "Haowise 为全球企业提供领先的AI自动化与智能基础设施服务。无论是RPA实施、低代码平台开发，还是AI Agent与GPU算力资源的高效配置，我们提供一站式解决方案，助您快速实现数字化转型。",
        ),
        ("keyPointsTitle", "我们的核心优势"),
        ("keyPoint1Title", "软件定制化开发"),
        ("keyPoint1Description", "制造业数智化解决方案"),
        ("keyPoint2Title", "RPA实施支持"),
        ("keyPoint2Description", "支持UiPath、影刀RPA实施"),
        ("keyPoint3Title", "低代码服务"),
        ("keyPoint3Description", "基于Power Platform的低代码服务（Power Apps/Automate/BI）"),
        ("keyPoint4Title", "AI Agent开发"),
        ("keyPoint4Description", "企业级AI Agent与RPA+Agent融合开发"),
        ("keyPoint5Title", "GPU资源分销"),
        ("keyPoint5Description", "AI软件产品以及高可扩展GPU资源分销（NVIDIA & 阿里云GPU）"),
        ("keyPoint6Title", "智能基础设施"),
        ("keyPoint6Description", "专为AI训练与推理场景设计的高性能基础设施"),
        ("ctaTitle", "准备好开启智能转型之旅？"),
        ("ctaDescription", "联系我们的专家团队，获取专属解决方案"),
        // Solutions page
        ("solutionsHeroTitle", "融合AI与自动化，打造企业智能引擎"),
        (
            "solutionsHeroDescription",
            "我们针对不同行业痛点，提供模块化、可扩展的AI解决方案，帮助企业实现流程数字化、决策智能化和运营自动化。",
        ),
        ("solutionsTitle", "我们的解决方案"),
        ("solution1Title", "软件系统定制开发"),
        (
            "solution1Description",
            "深刻理解制造业know-how和业务痛点，擅长制造业专业解决方案及工业软件的定制开发，比如MES、WMS、TMS、OMS等系统。",
        ),
        ("solution2Title", "AI Agent系统集成开发"),
        (
            "solution2Description",
            "通过Dify / FastGPT / Coze / n8n 等AI编排平台构建智能工作流，开箱即用智能体，定制开发智能体以及系统集成服务",
        ),
        ("solution3Title", "机器视觉工业质检"),
        (
            "solution3Description",
            "工业品的CV缺陷检测，从算法选型到模型部署，物体检测、图像分割技术，无监督异常检测算法等综合应用",
        ),
        ("solution4Title", "RPA+AI自动化实施"),
        (
            "solution4Description",
            "高效替代重复人工操作，提升流程效率30%以上，UiPath Power Automate，国产Uibot和影刀RPA工具实施开发",
        ),
        ("solution5Title", "低代码平台开发"),
        ("solution5Description", "基于微软Power Platform的快速构建业务应用，缩短交付周期50%"),
        ("solution6Title", "多云资源协同"),
        ("solution6Description", "整合阿里云、火山云等资源，实现弹性调度"),
        // Products page
        ("productsHeroTitle", "高效、稳定、可扩展的AI基础设施产品"),
        (
            "productsHeroDescription",
            "我们提供高品质的云资源与GPU硬件服务，专为AI训练与推理场景设计，满足企业对性能与成本的双重需求。",
        ),
        ("productsTitle", "我们的产品"),
        ("product1Title", "云资源分销"),
        ("product1Description", "阿里云、火山云官方资源分销：安全合规，价格透明"),
        ("product2Title", "NVIDIA系列GPU服务器转售"),
        ("product2Description", "NVIDIA系列GPU服务器转售：H20/L20等主流型号，支持快速交付"),
        ("product3Title", "国产GPU及GPU服务器的转手"),
        ("product3Description", "国产GPU及GPU服务器的转手：包含阿里平头哥PPU、华为GPU和寒武纪等"),
        ("product4Title", "代理AI 编排平台"),
        ("product4Description", "dify, FastGPT, Bisheng, Coze, Joyagent"),
        ("product5Title", "代理主流RPA产品"),
        ("product5Description", "UiPath 、影刀和Uibot。"),
        ("product6Title", "代理微软Office和Power Platform"),
        ("product6Description", "代理微软Office和Power Platform。"),
        // About page
        ("aboutHeroTitle", "我们是谁？—— 以技术驱动企业智能升级"),
        (
            "aboutHeroDescription",
            "Haowise 成立于2019年，由一支拥有多年AI与企业数字化经验的技术团队创立。我们致力于通过AI自动化与智能基础设施服务，帮助企业跨越技术门槛，实现业务飞轮增长。",
        ),
        ("aboutTitle", "关于Haowise"),
        ("aboutPoint1Title", "核心团队"),
        ("aboutPoint1Description", "核心团队来自阿里云、微软、英迈中国等头部科技公司"),
        ("aboutPoint2Title", "客户覆盖"),
        ("aboutPoint2Description", "服务客户涵盖金融、制造、零售、教育等行业"),
        ("aboutPoint3Title", "技术投入"),
        ("aboutPoint3Description", "持续投入AI与RPA技术生态建设"),
        ("aboutPoint4Title", "本地化支持"),
        ("aboutPoint4Description", "本地化支持团队：中文 + 英文双语服务响应"),
        ("aboutPoint5Title", "合规标准"),
        ("aboutPoint5Description", "严格遵守数据安全与合规标准（GDPR, 中国网络安全法）"),
        // Contact page
        ("contactHeroTitle", "联系我们"),
        ("contactHeroDescription", "我们期待与您合作，共同探索AI技术的无限可能"),
        ("contactInfoTitle", "联系信息"),
        ("contactInfoAddress", "地址"),
        ("contactInfoAddressValue", "江苏省无锡市"),
        ("contactInfoEmail", "邮箱"),
        ("contactInfoEmailValue", "zhen.sun@wxhzch.com"),
        ("contactInfoPhone", "电话"),
        ("contactInfoPhoneValue", "+86 180 0152 1283"),
        ("contactInfoHours", "办公时间"),
        ("contactInfoHoursValue", "周一至周五 9:00–18:00"),
        // Chat assistant
        ("chatTitle", "Haowise 智能助手"),
        ("chatGreeting", "你好！有什么可以帮助你的吗？"),
        ("chatPlaceholder", "输入消息..."),
        ("chatTyping", "正在输入..."),
        ("chatError", "抱歉，连接时出现错误。"),
        ("chatMinimized", "聊天已最小化，输入 /chat 恢复"),
        ("chatYou", "你"),
        ("chatAssistant", "助手"),
    ])
});

static EN: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Navigation
        ("home", "Home"),
        ("solutions", "Solutions"),
        ("products", "Products"),
        ("about", "About Us"),
        ("contact", "Contact"),
        // Homepage
        ("heroTitle", "Inspire Intelligent Future, Empower Business Growth"),
        (
            "heroDescription",
            "Haowise provides leading AI automation and intelligent infrastructure services to global enterprises. Whether it's RPA implementation, low-code platform development, or efficient configuration of AI Agents and GPU computing resources, we offer a one-stop solution to help you achieve rapid digital transformation.",
        ),
        ("keyPointsTitle", "Our Core Advantages"),
        ("keyPoint1Title", "Software Custom Development"),
        ("keyPoint1Description", "Digital and Intelligent Solutions for Manufacturing"),
        ("keyPoint2Title", "RPA Implementation Support"),
        ("keyPoint2Description", "UiPath and Yingdao RPA implementation support"),
        ("keyPoint3Title", "Low-Code Services"),
        ("keyPoint3Description", "Low-code services based on Power Platform (Power Apps/Automate/BI)"),
        ("keyPoint4Title", "AI Agent Development"),
        ("keyPoint4Description", "Enterprise-grade AI Agent and RPA+Agent integrated development"),
        ("keyPoint5Title", "GPU Resource Distribution"),
        (
            "keyPoint5Description",
            "AI software products and high-scalability GPU resource distribution (NVIDIA & Alibaba Cloud GPU)",
        ),
        ("keyPoint6Title", "Intelligent Infrastructure"),
        (
            "keyPoint6Description",
            "High-performance infrastructure designed for AI training and inference scenarios",
        ),
        ("ctaTitle", "Ready to Start Your Intelligent Transformation Journey?"),
        ("ctaDescription", "Contact our expert team for customized solutions"),
        // Solutions page
        (
            "solutionsHeroTitle",
            "Integrating AI and Automation to Build Enterprise Intelligence Engines",
        ),
        (
            "solutionsHeroDescription",
            "We provide modular, scalable AI solutions targeting industry pain points, helping enterprises achieve process digitization, intelligent decision-making, and operational automation.",
        ),
        ("solutionsTitle", "Our Solutions"),
        ("solution1Title", "Custom Software System Development"),
        (
            "solution1Description",
            "Deeply understand manufacturing expertise and business pain points, proficient in custom development of manufacturing software systems such as MES, WMS, TMS, OMS, etc.",
        ),
        ("solution2Title", "AI Agent System Integration Development"),
        (
            "solution2Description",
            "Building intelligent workflows through AI orchestration platforms like Dify / FastGPT / Coze / n8n, offering out-of-the-box agents, custom agent development, and system integration services",
        ),
        ("solution3Title", "Machine Vision Industrial Quality Inspection"),
        (
            "solution3Description",
            "CV defect detection for industrial products, comprehensive application from algorithm selection to model deployment, including object detection, image segmentation technologies, and unsupervised anomaly detection algorithms",
        ),
        ("solution4Title", "RPA+AI Automation Implementation"),
        (
            "solution4Description",
            "Efficiently replacing repetitive manual operations, improving process efficiency by over 30%, with implementation and development using UiPath, Power Automate, domestic Uibot, and Yingdao RPA tools",
        ),
        ("solution5Title", "Low-Code Platform Development"),
        (
            "solution5Description",
            "Rapid business application building based on Microsoft Power Platform, reducing delivery cycles by 50%",
        ),
        ("solution6Title", "Multi-Cloud Resource Coordination"),
        (
            "solution6Description",
            "Integrating resources from Alibaba Cloud, Volcano Cloud, and others to achieve elastic scheduling",
        ),
        // Products page
        ("productsHeroTitle", "Efficient, Stable, and Scalable AI Infrastructure Products"),
        (
            "productsHeroDescription",
            "We provide high-quality cloud resources and GPU hardware services, specifically designed for AI training and inference scenarios, meeting enterprises' dual requirements for performance and cost.",
        ),
        ("productsTitle", "Our Products"),
        ("product1Title", "Cloud Resource Distribution"),
        (
            "product1Description",
            "Official Resource Distribution for Alibaba Cloud and Volcano Cloud: Secure, compliant, and transparent pricing",
        ),
        ("product2Title", "NVIDIA Series GPU Servers Resale"),
        (
            "product2Description",
            "Resale of NVIDIA Series GPU Servers: Mainstream models like H20/L20, supporting fast delivery",
        ),
        ("product3Title", "Resale of Domestic GPUs and GPU Servers"),
        (
            "product3Description",
            "Resale of Domestic GPUs and GPU Servers: Including Alibaba Pingtouge PPU, Huawei GPU, and Cambricon, etc.",
        ),
        ("product4Title", "Agent AI Orchestration Platforms"),
        ("product4Description", "Dify, FastGPT, Bisheng, Coze and Joyagent."),
        ("product5Title", "Agent Mainstream RPA Products"),
        ("product5Description", "UiPath, Yingdao, and UiBot."),
        ("product6Title", "Agent Microsoft Office and Power Platform"),
        ("product6Description", "Agent Microsoft Office and Power Platform."),
        // About page
        ("aboutHeroTitle", "Who Are We? — Driving Enterprise Intelligence Upgrade Through Technology"),
        (
            "aboutHeroDescription",
            "Haowise was founded in 2019 by a technical team with years of experience in AI and enterprise digitalization. We are committed to helping enterprises overcome technological barriers and achieve business flywheel growth through AI automation and intelligent infrastructure services.",
        ),
        ("aboutTitle", "About Haowise"),
        ("aboutPoint1Title", "Core Team"),
        (
            "aboutPoint1Description",
            "The core team comes from top technology companies such as Alibaba Cloud, Microsoft, and IngramMicro China.",
        ),
        ("aboutPoint2Title", "Client Coverage"),
        (
            "aboutPoint2Description",
            "Serving clients across industries such as finance, manufacturing, retail, and education",
        ),
        ("aboutPoint3Title", "Technology Investment"),
        (
            "aboutPoint3Description",
            "Continuous investment in AI and RPA technology ecosystem development",
        ),
        ("aboutPoint4Title", "Localized Support"),
        (
            "aboutPoint4Description",
            "Localized support team: Bilingual service response in Chinese and English",
        ),
        ("aboutPoint5Title", "Compliance Standards"),
        (
            "aboutPoint5Description",
            "Strict compliance with data security and regulatory standards (GDPR, China Cybersecurity Law)",
        ),
        // Contact page
        ("contactHeroTitle", "Contact Us"),
        (
            "contactHeroDescription",
            "We look forward to collaborating with you to explore the infinite possibilities of AI technology",
        ),
        ("contactInfoTitle", "Contact Information"),
        ("contactInfoAddress", "Address"),
        ("contactInfoAddressValue", "Wuxi, Jiangsu, China"),
        ("contactInfoEmail", "Email"),
        ("contactInfoEmailValue", "zhen.sun@wxhzch.com"),
        ("contactInfoPhone", "Phone"),
        ("contactInfoPhoneValue", "+86 180 0152 1283"),
        ("contactInfoHours", "Office Hours"),
        ("contactInfoHoursValue", "Mon–Fri 9:00–18:00"),
        // Chat assistant
        ("chatTitle", "Haowise Assistant"),
        ("chatGreeting", "Hello! How can I help you today?"),
        ("chatPlaceholder", "Type a message..."),
        ("chatTyping", "Typing..."),
        ("chatError", "Sorry, something went wrong while connecting."),
        ("chatMinimized", "Chat minimized, type /chat to restore"),
        ("chatYou", "You"),
        ("chatAssistant", "Assistant"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_in_both_languages() {
        assert_eq!(tr(Language::Zh, "home"), "首页");
        assert_eq!(tr(Language::En, "home"), "Home");
        assert_eq!(tr(Language::Zh, "chatError"), "抱歉，连接时出现错误。");
    }

    #[test]
    fn unknown_keys_echo_back() {
        assert_eq!(tr(Language::Zh, "noSuchKey"), "noSuchKey");
        assert_eq!(tr(Language::En, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let mut zh_keys: Vec<_> = ZH.keys().collect();
        let mut en_keys: Vec<_> = EN.keys().collect();
        zh_keys.sort();
        en_keys.sort();
        assert_eq!(zh_keys, en_keys);
    }

    #[test]
    fn language_round_trips_through_str() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::Zh.toggled(), Language::En);
        assert_eq!(Language::default(), Language::Zh);
    }
}
