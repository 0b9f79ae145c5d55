use leptos::prelude::*;

use crate::components::starfield::{ContentEntity, StarfieldCanvas, TimeRange};

const CATEGORIES: &[&str] = &[
	"moment",
	"prophecy",
	"culture",
	"onsite",
	"inspiration",
	"history",
	"darkmoment",
];

/// Sample photons standing in for the data layer.
fn sample_photons() -> Vec<ContentEntity> {
	let photon = |id: u32, year, group: &str, category: &str, likes, author: &str, text: &str| {
		ContentEntity::new(id.to_string(), year)
			.with_group(group)
			.with_category(category)
			.with_engagement(likes)
			.with_text(author, text)
	};
	vec![
		photon(1, 2024, "华为", "moment", 42, "感知算法工程师 @ 华为", "2024年，第一次看到端到端大模型在车上运行，我知道游戏规则要变了。"),
		photon(2, 2024, "蔚来", "prophecy", 28, "系统架构师 @ 蔚来", "预言：2027年之前，L4会在特定场景落地，但通用L4仍需10年。"),
		photon(3, 2024, "小鹏", "culture", 36, "测试工程师 @ 小鹏", "今天又在这个路口接管的记录被清空了，感知和规控继续扯皮。"),
		photon(4, 2023, "卓驭", "moment", 56, "规控算法 @ 卓驭", "2023年底，看着测试车在暴雪中无接管跑完50公里，我第一次觉得不需要高精地图也行。"),
		photon(5, 2028, "特斯拉", "prophecy", 39, "传感器专家 @ 特斯拉", "立贴为证：2028年之前，纯视觉方案解决不了所有的Corner Case。"),
		photon(6, 2016, "特斯拉", "history", 156, "行业观察者", "2016年，第一次看到特斯拉Autopilot在国内开放，就知道这行业要变天了。"),
		photon(7, 2024, "百度", "onsite", 18, "测试工程师 @ 百度", "2024年3月，在测试场亲眼看到无图方案首次突破1000公里无接管。"),
		photon(8, 2021, "理想", "darkmoment", 64, "项目经理 @ 理想", "项目延期半年，团队走了一半人，在停车场抽烟时怀疑这一切是否值得。"),
		photon(9, 2022, "Momenta", "inspiration", 9, "算法工程师 @ Momenta", "凌晨调试代码时突然想到用Transformer重构整个规控模块。"),
		photon(10, 2024, "华为", "moment", 3, "实习生 @ 华为", "第一次上车跟测，全程手心出汗。"),
	]
}

fn toggle(signal: RwSignal<Option<String>>, value: &str) {
	signal.update(|current| {
		*current = match current.as_deref() {
			Some(v) if v == value => None,
			_ => Some(value.to_owned()),
		};
	});
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let photons = sample_photons();
	let mut companies: Vec<String> = photons
		.iter()
		.map(|p| p.group_name().to_owned())
		.collect();
	companies.sort();
	companies.dedup();

	let photons = Signal::derive(move || photons.clone());
	let time_range = RwSignal::new(TimeRange::default());
	let active_group = RwSignal::new(None::<String>);
	let active_category = RwSignal::new(None::<String>);
	let selected = RwSignal::new(None::<ContentEntity>);

	let on_click = Callback::new(move |photon: ContentEntity| selected.set(Some(photon)));

	view! {
		<div class="fullscreen-starfield">
			<StarfieldCanvas
				entities=photons
				time_range=time_range
				active_group=active_group
				active_category=active_category
				on_entity_click=on_click
			/>
			<div class="starfield-overlay">
				<h1>"Photon Starfield"</h1>
				<p class="subtitle">"Scroll to zoom. Drag to pan. Click a photon for details."</p>
				<label class="time-control">
					{move || {
						let range = time_range.get();
						format!("Timeline: {} - {}", range.start, range.end)
					}}
					<input
						type="range"
						min=TimeRange::default().start.to_string()
						max=TimeRange::default().end.to_string()
						prop:value=move || time_range.get().start.to_string()
						on:input=move |ev| {
							if let Ok(start) = event_target_value(&ev).parse::<i32>() {
								time_range.update(|range| *range = range.with_start(start));
							}
						}
					/>
				</label>
				<div class="legend">
					{CATEGORIES
						.iter()
						.map(|&category| {
							view! {
								<button
									class:active=move || active_category.get().as_deref() == Some(category)
									on:click=move |_| toggle(active_category, category)
								>
									{category}
								</button>
							}
						})
						.collect_view()}
				</div>
				<div class="legend">
					{companies
						.into_iter()
						.map(|company| {
							let key = company.clone();
							let label = company.clone();
							view! {
								<button
									class:active=move || active_group.get().as_deref() == Some(key.as_str())
									on:click=move |_| toggle(active_group, &company)
								>
									{label}
								</button>
							}
						})
						.collect_view()}
				</div>
			</div>
			{move || {
				selected
					.get()
					.map(|photon| {
						view! {
							<div class="photon-detail" on:click=move |_| selected.set(None)>
								<p>{photon.text.clone()}</p>
								<p class="author">{photon.author.clone()}</p>
								<p class="likes">{format!("{} resonance", photon.engagement)}</p>
							</div>
						}
					})
			}}
		</div>
	}
}
