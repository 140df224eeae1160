//! Vue 3 templates (single-file components, Pinia, Vitest)

use super::TemplateSet;
use crate::framework::FrameworkVariant;
use crate::naming::CanonicalName;

pub(crate) static TEMPLATES: TemplateSet = TemplateSet {
    framework: FrameworkVariant::Vue,
    views_dir: "views",
    stores_dir: "stores",
    composables_dir: "composables",

    component_file,
    component,
    stylesheet: None,
    test_file,
    component_test,
    index,
    loader_file,
    loader,

    routes,
    module_store: store,
    styles_main,

    store,
    composable,
    test_case,
};

fn component_file(name: &CanonicalName) -> String {
    format!("{}.vue", name)
}

fn test_file(name: &CanonicalName) -> String {
    format!("{}.spec.js", name)
}

fn loader_file(name: &CanonicalName) -> String {
    format!("{}Loader.js", name)
}

fn index(name: &CanonicalName) -> String {
    format!("export {{ default }} from './{}.vue'\n", name)
}

fn component(name: &CanonicalName) -> String {
    let class = name.css_class();
    format!(
        r#"<template>
  <div class="{class}">
    <h2>{{{{ title }}}}</h2>
  </div>
</template>

<script setup>
import {{ ref, onMounted }} from 'vue'

const title = ref('{name}')

onMounted(() => {{
  // Component mounted
}})
</script>

<style lang="scss" scoped>
.{class} {{
}}
</style>
"#
    )
}

fn component_test(name: &CanonicalName) -> String {
    let class = name.css_class();
    format!(
        r#"import {{ describe, it, expect, beforeEach }} from 'vitest'
import {{ mount }} from '@vue/test-utils'
import {name} from './{name}.vue'

describe('{name}', () => {{
  let wrapper

  beforeEach(() => {{
    wrapper = mount({name})
  }})

  it('renders properly', () => {{
    expect(wrapper.exists()).toBe(true)
  }})

  it('displays the correct title', () => {{
    expect(wrapper.find('h2').text()).toBe('{name}')
  }})

  it('has the correct class', () => {{
    expect(wrapper.classes()).toContain('{class}')
  }})
}})
"#
    )
}

fn loader(name: &CanonicalName) -> String {
    let selector = name.css_class();
    format!(
        r#"import {{ createApp }} from 'vue'
import {name} from './{name}.vue'

export function load() {{
  const selector = '{selector}'

  if (!document.querySelector(selector)) {{
    return
  }}

  const app = createApp({name}, {{ ...window[selector] }})
  app.mount(selector)
}}
"#
    )
}

fn routes(name: &CanonicalName) -> String {
    let path = name.css_class();
    format!(
        r#"const routes = [
  {{
    path: '/{path}',
    name: '{name}',
    component: () => import('./views/{name}View.vue'),
    meta: {{
      title: '{name}',
      requiresAuth: false
    }}
  }}
]

export default routes
"#
    )
}

fn store(name: &CanonicalName) -> String {
    let id = name.camel();
    format!(
        r#"import {{ defineStore }} from 'pinia'
import {{ ref, computed }} from 'vue'

export const use{name}Store = defineStore('{id}', () => {{
  const items = ref([])
  const loading = ref(false)

  const itemCount = computed(() => items.value.length)

  function addItem(item) {{
    items.value.push(item)
  }}

  function reset() {{
    items.value = []
    loading.value = false
  }}

  return {{ items, loading, itemCount, addItem, reset }}
}})
"#
    )
}

fn styles_main(name: &CanonicalName) -> String {
    format!("// {} module styles\n", name)
}

fn composable(name: &CanonicalName) -> String {
    let ident = name.camel();
    format!(
        r#"import {{ ref, computed }} from 'vue'

export function {ident}() {{
  const state = ref(null)
  const loading = ref(false)
  const error = ref(null)

  const hasState = computed(() => state.value !== null)

  function setState(value) {{
    state.value = value
  }}

  function reset() {{
    state.value = null
    error.value = null
  }}

  return {{ state, loading, error, hasState, setState, reset }}
}}
"#
    )
}

fn test_case(name: &CanonicalName) -> String {
    format!(
        r#"import {{ describe, it, expect }} from 'vitest'

describe('{name}', () => {{
  it('works', () => {{
    expect(true).toBe(true)
  }})
}})
"#
    )
}
